use uuid::Uuid;

/// The authenticated caller for one view session. Constructed explicitly by
/// whoever owns the request (handlers, embedded view-models) and passed down;
/// there is no process-wide "current user" accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: Uuid,
}

impl UserSession {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
