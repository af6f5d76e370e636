use crate::pkg::{
    client::api::JobsApi,
    internal::adaptors::jobs::spec::{JobEntry, JobInput, JobStatus},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Only(JobStatus),
}

impl Filter {
    pub const CHOICES: [Filter; 5] = [
        Filter::All,
        Filter::Only(JobStatus::Applied),
        Filter::Only(JobStatus::Interview),
        Filter::Only(JobStatus::Rejected),
        Filter::Only(JobStatus::Selected),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, job: &JobEntry) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(status) => job.status == *status,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::CHOICES.iter().position(|f| *f == self).unwrap_or(0);
        Self::CHOICES[(idx + 1) % Self::CHOICES.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Company,
    Position,
    Status,
    Date,
    Link,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::Company,
        Field::Position,
        Field::Status,
        Field::Date,
        Field::Link,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Company => "Company Name",
            Field::Position => "Position",
            Field::Status => "Status",
            Field::Date => "Date",
            Field::Link => "Job Application Link",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Draft behind the form. Status is always a member of the enumeration here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub date: String,
    pub link: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Company => self.company.clone(),
            Field::Position => self.position.clone(),
            Field::Status => self.status.to_string(),
            Field::Date => self.date.clone(),
            Field::Link => self.link.clone(),
        }
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Company => Some(&mut self.company),
            Field::Position => Some(&mut self.position),
            Field::Date => Some(&mut self.date),
            Field::Link => Some(&mut self.link),
            Field::Status => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.company.is_empty()
            && !self.position.is_empty()
            && !self.date.is_empty()
            && !self.link.is_empty()
    }

    pub fn to_input(&self) -> JobInput {
        JobInput {
            company: self.company.clone(),
            position: self.position.clone(),
            status: Some(self.status.to_string()),
            date: self.date.clone(),
            link: self.link.clone(),
        }
    }
}

impl From<&JobEntry> for Draft {
    fn from(job: &JobEntry) -> Self {
        Draft {
            company: job.company.clone(),
            position: job.position.clone(),
            status: job.status,
            date: job.date.clone(),
            link: job.link.clone(),
        }
    }
}

/// Client-side view of the jobs resource plus the form, filter and search state.
pub struct Tracker<A: JobsApi> {
    api: A,
    pub jobs: Vec<JobEntry>,
    pub draft: Draft,
    pub edit_id: Option<String>,
    pub filter: Filter,
    pub search_term: String,
    pub notices: Vec<Notice>,
}

impl<A: JobsApi> Tracker<A> {
    pub fn new(api: A) -> Self {
        Tracker {
            api,
            jobs: Vec::new(),
            draft: Draft::default(),
            edit_id: None,
            filter: Filter::All,
            search_term: String::new(),
            notices: Vec::new(),
        }
    }

    fn notify(&mut self, level: NoticeLevel, text: &str) {
        self.notices.push(Notice {
            level,
            text: text.to_string(),
        });
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(jobs) => self.jobs = jobs,
            Err(e) => {
                tracing::error!("failed to fetch jobs: {}", e);
                self.jobs = Vec::new();
                self.notify(NoticeLevel::Error, "Failed to fetch jobs");
            }
        }
    }

    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Status => match value.parse() {
                Ok(status) => self.draft.status = status,
                Err(e) => tracing::warn!("ignoring status value: {}", e),
            },
            other => {
                if let Some(slot) = self.draft.text_mut(other) {
                    *slot = value.to_string();
                }
            }
        }
    }

    pub async fn submit(&mut self) {
        if !self.draft.is_complete() {
            self.notify(NoticeLevel::Error, "Fill all fields");
            return;
        }
        let input = self.draft.to_input();
        let result = match &self.edit_id {
            Some(id) => self.api.update(id, &input).await,
            None => self.api.create(&input).await,
        };
        match result {
            Ok(job) => {
                if let Some(id) = self.edit_id.take() {
                    for slot in self.jobs.iter_mut().filter(|j| j.id.to_string() == id) {
                        *slot = job.clone();
                    }
                    self.notify(NoticeLevel::Success, "Job updated!");
                } else {
                    self.jobs.push(job);
                    self.notify(NoticeLevel::Success, "Job added!");
                }
                self.draft = Draft::default();
            }
            Err(e) => {
                tracing::error!("error submitting job: {}", e);
                self.notify(NoticeLevel::Error, "Failed to submit job");
            }
        }
    }

    pub fn edit(&mut self, id: &str) {
        if let Some(job) = self.jobs.iter().find(|j| j.id.to_string() == id) {
            self.draft = Draft::from(job);
            self.edit_id = Some(id.to_string());
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_id = None;
        self.draft = Draft::default();
    }

    pub async fn delete(&mut self, id: &str) {
        match self.api.remove(id).await {
            Ok(()) => {
                self.jobs.retain(|j| j.id.to_string() != id);
                self.notify(NoticeLevel::Info, "Job deleted");
            }
            Err(e) => tracing::error!("failed to delete job {}: {}", id, e),
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// Jobs matching the search term (company or position) and then the filter.
    pub fn visible(&self) -> Vec<&JobEntry> {
        let needle = self.search_term.to_lowercase();
        self.jobs
            .iter()
            .filter(|j| {
                j.company.to_lowercase().contains(&needle)
                    || j.position.to_lowercase().contains(&needle)
            })
            .filter(|j| self.filter.matches(j))
            .collect()
    }

    /// Per-status totals over every job, ignoring filter and search.
    pub fn status_counts(&self) -> Vec<(JobStatus, usize)> {
        JobStatus::ALL
            .into_iter()
            .map(|status| (status, self.jobs.iter().filter(|j| j.status == status).count()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    };

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::prelude::{Result, TrackerError};

    #[derive(Default)]
    struct FakeApi {
        calls: Arc<Mutex<Vec<String>>>,
        remote: Arc<Mutex<Vec<JobEntry>>>,
        failing: Arc<AtomicBool>,
    }

    impl FakeApi {
        fn fail(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(TrackerError::Network("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl JobsApi for FakeApi {
        async fn list(&self) -> Result<Vec<JobEntry>> {
            self.calls.lock().unwrap().push("list".into());
            self.fail()?;
            Ok(self.remote.lock().unwrap().clone())
        }

        async fn create(&self, job: &JobInput) -> Result<JobEntry> {
            self.calls.lock().unwrap().push("create".into());
            self.fail()?;
            let new = job.clone().into_new_job()?;
            let entry = entry(&new.company, &new.position, new.status);
            self.remote.lock().unwrap().push(entry.clone());
            Ok(entry)
        }

        async fn update(&self, id: &str, job: &JobInput) -> Result<JobEntry> {
            self.calls.lock().unwrap().push(format!("update {}", id));
            self.fail()?;
            let new = job.clone().into_new_job()?;
            let mut remote = self.remote.lock().unwrap();
            let slot = remote
                .iter_mut()
                .find(|j| j.id.to_string() == id)
                .ok_or(TrackerError::NotFound)?;
            slot.company = new.company;
            slot.position = new.position;
            slot.status = new.status;
            slot.date = new.date;
            slot.link = new.link;
            Ok(slot.clone())
        }

        async fn remove(&self, id: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("remove {}", id));
            self.fail()?;
            self.remote.lock().unwrap().retain(|j| j.id.to_string() != id);
            Ok(())
        }
    }

    fn entry(company: &str, position: &str, status: JobStatus) -> JobEntry {
        JobEntry {
            id: Uuid::new_v4(),
            company: company.into(),
            position: position.into(),
            status,
            date: "2024-01-01".into(),
            link: "http://x".into(),
            created_at: Utc::now(),
        }
    }

    fn tracker_with(jobs: Vec<JobEntry>) -> (Tracker<FakeApi>, Arc<Mutex<Vec<String>>>, Arc<AtomicBool>) {
        let api = FakeApi::default();
        *api.remote.lock().unwrap() = jobs;
        let calls = api.calls.clone();
        let failing = api.failing.clone();
        (Tracker::new(api), calls, failing)
    }

    fn fill(t: &mut Tracker<FakeApi>) {
        t.set_field(Field::Company, "Foo");
        t.set_field(Field::Position, "Engineer");
        t.set_field(Field::Date, "2024-01-01");
        t.set_field(Field::Link, "http://x");
    }

    #[tokio::test]
    async fn load_replaces_jobs() {
        let (mut t, _, _) = tracker_with(vec![entry("Foo", "Dev", JobStatus::Applied)]);
        t.load().await;
        assert_eq!(t.jobs.len(), 1);
        assert!(t.notices.is_empty());
    }

    #[tokio::test]
    async fn failed_load_empties_jobs_and_notifies() {
        let (mut t, _, failing) = tracker_with(vec![entry("Foo", "Dev", JobStatus::Applied)]);
        t.load().await;
        failing.store(true, Ordering::SeqCst);
        t.load().await;
        assert!(t.jobs.is_empty());
        assert_eq!(t.last_notice().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn incomplete_form_makes_no_calls() {
        let (mut t, calls, _) = tracker_with(vec![]);
        fill(&mut t);
        t.set_field(Field::Link, "");
        t.submit().await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(t.jobs.is_empty());
        assert_eq!(t.last_notice().unwrap().text, "Fill all fields");
        assert_eq!(t.draft.company, "Foo");
    }

    #[tokio::test]
    async fn submit_creates_and_resets_form() {
        let (mut t, calls, _) = tracker_with(vec![]);
        fill(&mut t);
        t.set_field(Field::Status, "Interview");
        t.submit().await;

        assert_eq!(*calls.lock().unwrap(), vec!["create".to_string()]);
        assert_eq!(t.jobs.len(), 1);
        assert_eq!(t.jobs[0].status, JobStatus::Interview);
        assert_eq!(t.draft, Draft::default());
        assert_eq!(t.last_notice().unwrap().text, "Job added!");
    }

    #[tokio::test]
    async fn edit_then_submit_replaces_entry_in_place() {
        let first = entry("Foo", "Engineer", JobStatus::Applied);
        let second = entry("Bar", "Designer", JobStatus::Applied);
        let id = first.id.to_string();
        let (mut t, calls, _) = tracker_with(vec![first.clone(), second]);
        t.load().await;

        t.edit(&id);
        assert_eq!(t.edit_id.as_deref(), Some(id.as_str()));
        assert_eq!(t.draft.company, "Foo");
        t.set_field(Field::Status, "Interview");
        t.submit().await;

        assert!(calls.lock().unwrap().contains(&format!("update {}", id)));
        assert_eq!(t.jobs.len(), 2);
        assert_eq!(t.jobs[0].id, first.id);
        assert_eq!(t.jobs[0].status, JobStatus::Interview);
        assert_eq!(t.edit_id, None);
        assert_eq!(t.draft, Draft::default());
    }

    #[tokio::test]
    async fn failed_submit_keeps_state() {
        let (mut t, _, failing) = tracker_with(vec![]);
        fill(&mut t);
        failing.store(true, Ordering::SeqCst);
        t.submit().await;

        assert!(t.jobs.is_empty());
        assert_eq!(t.draft.company, "Foo");
        assert_eq!(t.last_notice().unwrap().text, "Failed to submit job");
    }

    #[tokio::test]
    async fn delete_removes_locally_only_on_success() {
        let job = entry("Foo", "Engineer", JobStatus::Applied);
        let id = job.id.to_string();
        let (mut t, _, failing) = tracker_with(vec![job]);
        t.load().await;

        failing.store(true, Ordering::SeqCst);
        t.delete(&id).await;
        assert_eq!(t.jobs.len(), 1);

        failing.store(false, Ordering::SeqCst);
        t.delete(&id).await;
        assert!(t.jobs.is_empty());
        assert_eq!(t.last_notice().unwrap().text, "Job deleted");
    }

    #[tokio::test]
    async fn filter_applies_after_search() {
        let (mut t, _, _) = tracker_with(vec![
            entry("Acme", "Engineer", JobStatus::Applied),
            entry("Globex", "Engineer", JobStatus::Applied),
            entry("Initech", "Analyst", JobStatus::Interview),
        ]);
        t.load().await;

        t.set_filter(Filter::Only(JobStatus::Interview));
        assert_eq!(t.visible().len(), 1);
        t.set_search("initech");
        assert_eq!(t.visible().len(), 1);
        t.set_search("acme");
        assert!(t.visible().is_empty());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_on_company_or_position() {
        let (mut t, _, _) = tracker_with(vec![
            entry("ACME Corp", "Engineer", JobStatus::Applied),
            entry("Globex", "Acme liaison", JobStatus::Rejected),
            entry("Initech", "Analyst", JobStatus::Interview),
        ]);
        t.load().await;

        t.set_search("acme");
        let companies: Vec<_> = t.visible().iter().map(|j| j.company.clone()).collect();
        assert_eq!(companies, vec!["ACME Corp".to_string(), "Globex".to_string()]);
    }

    #[tokio::test]
    async fn counts_cover_all_jobs_regardless_of_view() {
        let (mut t, _, _) = tracker_with(vec![
            entry("Acme", "Engineer", JobStatus::Applied),
            entry("Globex", "Engineer", JobStatus::Applied),
            entry("Initech", "Analyst", JobStatus::Interview),
        ]);
        t.load().await;
        t.set_filter(Filter::Only(JobStatus::Selected));
        t.set_search("zzz");

        let counts = t.status_counts();
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), t.jobs.len());
        assert_eq!(counts[0], (JobStatus::Applied, 2));
        assert_eq!(counts[1], (JobStatus::Interview, 1));
    }

    #[test]
    fn filter_cycles_back_to_all() {
        let mut f = Filter::All;
        for _ in 0..Filter::CHOICES.len() {
            f = f.next();
        }
        assert_eq!(f, Filter::All);
    }
}
