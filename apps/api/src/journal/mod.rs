//! Daily notes with goals, self-esteem check-ins, and the saved-content
//! shelf. Validation messages mirror the journal forms' field rules.

pub mod analytics;
pub mod handlers;

pub use analytics::ProgressReport;

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::content::SavedItem;
use crate::models::note::{Checkin, Note};
use crate::repo::ContentRepository;
use crate::session::UserSession;

pub struct JournalService {
    repo: Arc<dyn ContentRepository>,
}

impl JournalService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// Stores one day's note and goals. Both fields are required; edges are
    /// trimmed before storing.
    pub async fn create_note(
        &self,
        session: &UserSession,
        date: NaiveDate,
        content: &str,
        goals: &str,
    ) -> Result<Note, AppError> {
        if session.user_id.is_nil() {
            return Err(AppError::Validation("User id must not be nil".to_string()));
        }
        let content = content.trim();
        let goals = goals.trim();
        if content.is_empty() {
            return Err(AppError::Validation(
                "Please enter your daily note".to_string(),
            ));
        }
        if goals.is_empty() {
            return Err(AppError::Validation(
                "Please enter your daily goals".to_string(),
            ));
        }
        if !self.repo.user_exists(session.user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        self.repo
            .create_note(session.user_id, date, content, goals)
            .await
    }

    /// The session's journal, newest first.
    pub async fn notes(&self, session: &UserSession) -> Result<Vec<Note>, AppError> {
        self.repo.find_notes(session.user_id).await
    }

    /// Saved-content bookmarks with their targets resolved.
    pub async fn saved(&self, session: &UserSession) -> Result<Vec<SavedItem>, AppError> {
        self.repo.find_saved(session.user_id).await
    }

    /// Stores one self-esteem check-in: a 0 to 10 rating and a journal
    /// line.
    pub async fn create_checkin(
        &self,
        session: &UserSession,
        date: NaiveDate,
        score: i32,
        journal: &str,
    ) -> Result<Checkin, AppError> {
        if session.user_id.is_nil() {
            return Err(AppError::Validation("User id must not be nil".to_string()));
        }
        if !(0..=10).contains(&score) {
            return Err(AppError::Validation(
                "Self-esteem rating must be between 0 and 10".to_string(),
            ));
        }
        let journal = journal.trim();
        if journal.is_empty() {
            return Err(AppError::Validation(
                "Please enter your journal entry".to_string(),
            ));
        }
        if !self.repo.user_exists(session.user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        self.repo
            .create_checkin(session.user_id, date, score, journal)
            .await
    }

    /// Check-in scores and notes-per-day counts clipped to an optional
    /// inclusive date range, with the peak self-esteem day and the busiest
    /// journaling day.
    pub async fn progress(
        &self,
        session: &UserSession,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<ProgressReport, AppError> {
        let checkins = self.repo.find_checkins(session.user_id).await?;
        let notes = self.repo.find_notes(session.user_id).await?;
        let series = analytics::progress_series(&checkins, from, to);
        let activity = analytics::activity_series(&notes, from, to);
        let peak = analytics::peak_day(&series);
        let busiest = analytics::busiest_day(&activity);
        Ok(ProgressReport {
            series,
            activity,
            peak,
            busiest,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::errors::ErrorKind;
    use crate::feed::SearchFilter;
    use crate::models::content::{Engagement, EngagementKind, Image, Quote, Video};

    use super::*;

    struct FakeRepo {
        users: Vec<Uuid>,
        checkins: Vec<Checkin>,
        notes: StdMutex<Vec<Note>>,
    }

    impl FakeRepo {
        fn knowing(users: Vec<Uuid>) -> Arc<Self> {
            Arc::new(Self {
                users,
                checkins: Vec::new(),
                notes: StdMutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ContentRepository for FakeRepo {
        async fn user_exists(&self, user_id: Uuid) -> Result<bool, AppError> {
            Ok(self.users.contains(&user_id))
        }

        async fn create_note(
            &self,
            user_id: Uuid,
            date: NaiveDate,
            content: &str,
            goals: &str,
        ) -> Result<Note, AppError> {
            let note = Note {
                id: Uuid::new_v4(),
                user_id,
                date,
                content: content.to_string(),
                goals: goals.to_string(),
                created_at: Utc::now(),
            };
            self.notes.lock().unwrap().push(note.clone());
            Ok(note)
        }

        async fn find_notes(&self, user_id: Uuid) -> Result<Vec<Note>, AppError> {
            Ok(self
                .notes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn create_checkin(
            &self,
            user_id: Uuid,
            date: NaiveDate,
            score: i32,
            journal: &str,
        ) -> Result<Checkin, AppError> {
            Ok(Checkin {
                id: Uuid::new_v4(),
                user_id,
                date,
                score,
                journal: journal.to_string(),
                created_at: Utc::now(),
            })
        }

        async fn find_checkins(&self, _user_id: Uuid) -> Result<Vec<Checkin>, AppError> {
            Ok(self.checkins.clone())
        }

        async fn find_saved(&self, _user_id: Uuid) -> Result<Vec<SavedItem>, AppError> {
            Ok(Vec::new())
        }

        async fn find_quotes(&self, _filter: &SearchFilter) -> Result<Vec<Quote>, AppError> {
            unimplemented!("not exercised by journal tests")
        }

        async fn find_images(&self) -> Result<Vec<Image>, AppError> {
            unimplemented!("not exercised by journal tests")
        }

        async fn find_videos(&self) -> Result<Vec<Video>, AppError> {
            unimplemented!("not exercised by journal tests")
        }

        async fn content_exists(&self, _content_id: Uuid) -> Result<bool, AppError> {
            unimplemented!("not exercised by journal tests")
        }

        async fn create_engagement(
            &self,
            _kind: EngagementKind,
            _content_id: Uuid,
            _user_id: Uuid,
            _text: Option<&str>,
        ) -> Result<Engagement, AppError> {
            unimplemented!("not exercised by journal tests")
        }

        async fn liked_categories(&self, _user_id: Uuid) -> Result<Vec<String>, AppError> {
            unimplemented!("not exercised by journal tests")
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn note_requires_both_fields() {
        let user = Uuid::new_v4();
        let repo = FakeRepo::knowing(vec![user]);
        let svc = JournalService::new(repo);
        let session = UserSession::new(user);

        let err = svc
            .create_note(&session, day("2026-03-01"), "  ", "run 5k")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Please enter your daily note");

        let err = svc
            .create_note(&session, day("2026-03-01"), "slept well", "")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Please enter your daily goals"
        );
    }

    #[tokio::test]
    async fn note_is_trimmed_and_stored() {
        let user = Uuid::new_v4();
        let repo = FakeRepo::knowing(vec![user]);
        let svc = JournalService::new(repo.clone());

        let note = svc
            .create_note(
                &UserSession::new(user),
                day("2026-03-01"),
                "  slept well  ",
                " run 5k ",
            )
            .await
            .unwrap();

        assert_eq!(note.content, "slept well");
        assert_eq!(note.goals, "run 5k");
        assert_eq!(repo.notes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn note_for_unknown_user_is_not_found() {
        let repo = FakeRepo::knowing(vec![]);
        let svc = JournalService::new(repo);

        let err = svc
            .create_note(
                &UserSession::new(Uuid::new_v4()),
                day("2026-03-01"),
                "note",
                "goals",
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn checkin_score_must_stay_on_the_scale() {
        let user = Uuid::new_v4();
        let repo = FakeRepo::knowing(vec![user]);
        let svc = JournalService::new(repo);
        let session = UserSession::new(user);

        for score in [-1, 11] {
            let err = svc
                .create_checkin(&session, day("2026-03-01"), score, "rough day")
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }

        for score in [0, 10] {
            svc.create_checkin(&session, day("2026-03-01"), score, "edge day")
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn checkin_requires_a_journal_line() {
        let user = Uuid::new_v4();
        let repo = FakeRepo::knowing(vec![user]);
        let svc = JournalService::new(repo);

        let err = svc
            .create_checkin(&UserSession::new(user), day("2026-03-01"), 5, "   ")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation error: Please enter your journal entry"
        );
    }

    #[tokio::test]
    async fn progress_clips_and_summarizes() {
        let user = Uuid::new_v4();
        let checkin = |day_s: &str, score: i32, journal: &str| Checkin {
            id: Uuid::new_v4(),
            user_id: user,
            date: day(day_s),
            score,
            journal: journal.to_string(),
            created_at: Utc::now(),
        };
        let repo = FakeRepo {
            users: vec![user],
            checkins: vec![
                checkin("2026-03-01", 3, "low"),
                checkin("2026-03-08", 9, "high"),
                checkin("2026-03-20", 6, "ok"),
            ],
            notes: StdMutex::new(Vec::new()),
        };
        let svc = JournalService::new(Arc::new(repo));
        let session = UserSession::new(user);
        for date in ["2026-03-02", "2026-03-08", "2026-03-08", "2026-03-19"] {
            svc.create_note(&session, day(date), "note", "goals")
                .await
                .unwrap();
        }

        let report = svc
            .progress(&session, Some(day("2026-03-01")), Some(day("2026-03-10")))
            .await
            .unwrap();

        assert_eq!(report.series.len(), 2);
        assert_eq!(report.peak.unwrap().date, day("2026-03-08"));
        assert_eq!(report.activity.len(), 2);
        let busiest = report.busiest.unwrap();
        assert_eq!(busiest.date, day("2026-03-08"));
        assert_eq!(busiest.notes, 2);
    }
}
