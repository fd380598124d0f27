//! Repository persisted to a single JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use super::memory::{MemoryRepository, Tables};
use super::repository::{RepoError, RepoResult, Repository};
use crate::models::{
    IndependentSubmission, IndependentWork, IndependentWorkUpdate, Lecture, LectureUpdate,
    NewIndependentWork, NewLecture, NewPractical, NewSubmission, NewTestResult, Practical,
    PracticalUpdate, Profile, ProfileUpdate, Question, StudentProgress, TestQuestion, TestResult,
};

/// Keeps every table in memory and rewrites the whole file after each
/// successful write. A write whose file update fails is rolled back.
#[derive(Debug)]
pub struct JsonRepository {
    path: PathBuf,
    inner: MemoryRepository,
}

impl JsonRepository {
    /// Opens the snapshot at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();

        let tables = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Tables::default(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| RepoError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "data file not found, starting empty");
                Tables::default()
            }
            Err(source) => return Err(RepoError::Io { path, source }),
        };

        Ok(Self {
            path,
            inner: MemoryRepository::from_tables(tables),
        })
    }

    /// Writes `seed` to `path`, replacing whatever was there.
    pub fn create(path: impl Into<PathBuf>, seed: MemoryRepository) -> RepoResult<Self> {
        let repo = Self {
            path: path.into(),
            inner: seed,
        };
        repo.save()?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> RepoResult<()> {
        let io_err = |source: io::Error| RepoError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(self.inner.tables()).map_err(|source| {
            RepoError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        debug!(path = %self.path.display(), "saved data file");
        Ok(())
    }

    fn write<T>(
        &mut self,
        op: impl FnOnce(&mut MemoryRepository) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let before = self.inner.clone();
        let value = op(&mut self.inner)?;

        if let Err(err) = self.save() {
            self.inner = before;
            return Err(err);
        }
        Ok(value)
    }
}

impl Repository for JsonRepository {
    fn profile(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        self.inner.profile(id)
    }

    fn students(&self) -> RepoResult<Vec<Profile>> {
        self.inner.students()
    }

    fn admins(&self) -> RepoResult<Vec<Profile>> {
        self.inner.admins()
    }

    fn insert_profile(&mut self, profile: Profile) -> RepoResult<Profile> {
        self.write(|repo| repo.insert_profile(profile))
    }

    fn update_profile(&mut self, id: Uuid, update: ProfileUpdate) -> RepoResult<Profile> {
        self.write(|repo| repo.update_profile(id, update))
    }

    fn delete_profile(&mut self, id: Uuid) -> RepoResult<()> {
        self.write(|repo| repo.delete_profile(id))
    }

    fn lectures(&self) -> RepoResult<Vec<Lecture>> {
        self.inner.lectures()
    }

    fn lecture(&self, id: Uuid) -> RepoResult<Option<Lecture>> {
        self.inner.lecture(id)
    }

    fn published_lecture_by_order(&self, order_number: u32) -> RepoResult<Option<Lecture>> {
        self.inner.published_lecture_by_order(order_number)
    }

    fn insert_lecture(&mut self, lecture: NewLecture) -> RepoResult<Lecture> {
        self.write(|repo| repo.insert_lecture(lecture))
    }

    fn update_lecture(&mut self, id: Uuid, update: LectureUpdate) -> RepoResult<Lecture> {
        self.write(|repo| repo.update_lecture(id, update))
    }

    fn delete_lecture(&mut self, id: Uuid) -> RepoResult<()> {
        self.write(|repo| repo.delete_lecture(id))
    }

    fn practicals(&self) -> RepoResult<Vec<Practical>> {
        self.inner.practicals()
    }

    fn practical(&self, id: Uuid) -> RepoResult<Option<Practical>> {
        self.inner.practical(id)
    }

    fn published_practical_by_order(&self, order_number: u32) -> RepoResult<Option<Practical>> {
        self.inner.published_practical_by_order(order_number)
    }

    fn insert_practical(
        &mut self,
        practical: NewPractical,
        questions: Vec<Question>,
    ) -> RepoResult<Practical> {
        self.write(|repo| repo.insert_practical(practical, questions))
    }

    fn update_practical(
        &mut self,
        id: Uuid,
        update: PracticalUpdate,
        questions: Option<Vec<Question>>,
    ) -> RepoResult<Practical> {
        self.write(|repo| repo.update_practical(id, update, questions))
    }

    fn delete_practical(&mut self, id: Uuid) -> RepoResult<()> {
        self.write(|repo| repo.delete_practical(id))
    }

    fn test_questions(&self, practical_id: Uuid) -> RepoResult<Vec<TestQuestion>> {
        self.inner.test_questions(practical_id)
    }

    fn independent_works(&self) -> RepoResult<Vec<IndependentWork>> {
        self.inner.independent_works()
    }

    fn independent_work(&self, id: Uuid) -> RepoResult<Option<IndependentWork>> {
        self.inner.independent_work(id)
    }

    fn insert_independent_work(&mut self, work: NewIndependentWork) -> RepoResult<IndependentWork> {
        self.write(|repo| repo.insert_independent_work(work))
    }

    fn update_independent_work(
        &mut self,
        id: Uuid,
        update: IndependentWorkUpdate,
    ) -> RepoResult<IndependentWork> {
        self.write(|repo| repo.update_independent_work(id, update))
    }

    fn delete_independent_work(&mut self, id: Uuid) -> RepoResult<()> {
        self.write(|repo| repo.delete_independent_work(id))
    }

    fn submissions(&self, student_id: Uuid) -> RepoResult<Vec<IndependentSubmission>> {
        self.inner.submissions(student_id)
    }

    fn submission(&self, id: Uuid) -> RepoResult<Option<IndependentSubmission>> {
        self.inner.submission(id)
    }

    fn insert_submission(&mut self, submission: NewSubmission) -> RepoResult<IndependentSubmission> {
        self.write(|repo| repo.insert_submission(submission))
    }

    fn grade_submission(&mut self, id: Uuid, score: u32) -> RepoResult<IndependentSubmission> {
        self.write(|repo| repo.grade_submission(id, score))
    }

    fn student_progress(&self, student_id: Uuid) -> RepoResult<Vec<StudentProgress>> {
        self.inner.student_progress(student_id)
    }

    fn mark_lecture_complete(
        &mut self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> RepoResult<StudentProgress> {
        self.write(|repo| repo.mark_lecture_complete(student_id, lecture_id))
    }

    fn test_result(&self, student_id: Uuid, practical_id: Uuid) -> RepoResult<Option<TestResult>> {
        self.inner.test_result(student_id, practical_id)
    }

    fn test_results(&self, student_id: Uuid) -> RepoResult<Vec<TestResult>> {
        self.inner.test_results(student_id)
    }

    fn all_test_results(&self) -> RepoResult<Vec<TestResult>> {
        self.inner.all_test_results()
    }

    fn upsert_test_result(&mut self, result: NewTestResult) -> RepoResult<TestResult> {
        self.write(|repo| repo.upsert_test_result(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionLabel, Status};
    use tempfile::TempDir;

    fn sample_question() -> Question {
        Question {
            question_text: "Which keyword declares a constant?".to_string(),
            options: ["let".into(), "const".into(), "mut".into(), "static mut".into()],
            correct_answer: OptionLabel::B,
            order_number: 1,
        }
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonRepository::open(dir.path().join("data.json")).unwrap();
        assert!(repo.practicals().unwrap().is_empty());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let practical_id = {
            let mut repo = JsonRepository::open(&path).unwrap();
            let practical = repo
                .insert_practical(
                    NewPractical {
                        title: "Constants".to_string(),
                        order_number: 1,
                        status: Status::Published,
                        ..Default::default()
                    },
                    vec![sample_question()],
                )
                .unwrap();
            practical.id
        };

        let reopened = JsonRepository::open(&path).unwrap();
        let rows = reopened.test_questions(practical_id).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].option(OptionLabel::B), "const");
        assert_eq!(rows[0].correct_answer, OptionLabel::B);
    }

    #[test]
    fn test_create_seeds_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("demo.json");

        JsonRepository::create(&path, MemoryRepository::demo()).unwrap();
        let reopened = JsonRepository::open(&path).unwrap();

        assert_eq!(reopened.students().unwrap().len(), 2);
        assert_eq!(reopened.lectures().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        let result = JsonRepository::open(&path);
        assert!(matches!(result, Err(RepoError::Json { .. })));
    }

    #[test]
    fn test_failed_write_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut repo = JsonRepository::open(&path).unwrap();

        let result = repo.delete_lecture(Uuid::new_v4());
        assert!(matches!(result, Err(RepoError::NotFound { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("course");
        let mut repo = JsonRepository::open(parent.join("data.json")).unwrap();

        // A regular file where the data directory should be.
        fs::write(&parent, "not a directory").unwrap();

        let lecture = NewLecture {
            title: "Traits".to_string(),
            order_number: 1,
            ..Default::default()
        };
        let result = repo.insert_lecture(lecture.clone());
        assert!(matches!(result, Err(RepoError::Io { .. })));
        assert!(repo.lectures().unwrap().is_empty());

        fs::remove_file(&parent).unwrap();
        repo.insert_lecture(lecture).unwrap();
        assert_eq!(repo.lectures().unwrap().len(), 1);
        assert!(parent.join("data.json").exists());
    }
}
