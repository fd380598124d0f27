//! In-process repository, also used as the demo data set.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::repository::{RepoError, RepoResult, Repository};
use crate::models::{
    IndependentSubmission, IndependentWork, IndependentWorkUpdate, Lecture, LectureUpdate,
    NewIndependentWork, NewLecture, NewPractical, NewSubmission, NewTestResult, OptionLabel,
    Practical, PracticalUpdate, Profile, ProfileUpdate, Question, Role, Status, StudentProgress,
    TestQuestion, TestResult,
};

/// Every table of the platform. Serialized as-is by the JSON store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub profiles: Vec<Profile>,
    pub lectures: Vec<Lecture>,
    pub practicals: Vec<Practical>,
    pub test_questions: Vec<TestQuestion>,
    pub independent_work: Vec<IndependentWork>,
    pub independent_submissions: Vec<IndependentSubmission>,
    pub student_progress: Vec<StudentProgress>,
    pub test_results: Vec<TestResult>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tables: Tables,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Tables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// A small course: an admin, two students, two lectures, one practical
    /// with a full ten-question test and one independent work.
    pub fn demo() -> Self {
        let mut tables = Tables::default();

        let admin = Profile::new("admin@platform.uz", Role::Admin).with_name("Admin", "User");
        let aziz = Profile::new("aziz@platform.uz", Role::Student).with_name("Aziz", "Karimov");
        let malika =
            Profile::new("malika@platform.uz", Role::Student).with_name("Malika", "Yusupova");
        let admin_id = admin.id;
        tables.profiles.extend([admin, aziz, malika]);

        for (order, title) in [(1, "Introduction to Rust"), (2, "Ownership and borrowing")] {
            tables.lectures.push(Lecture::from_new(NewLecture {
                title: title.to_string(),
                content: format!("{} lecture notes.", title),
                order_number: order,
                status: Status::Published,
                created_by: admin_id,
                ..Default::default()
            }));
        }

        let practical = Practical::from_new(NewPractical {
            title: "Variables and types".to_string(),
            description: Some("Test on the first lecture".to_string()),
            order_number: 1,
            status: Status::Published,
            created_by: admin_id,
            ..Default::default()
        });
        for i in 0..10 {
            let question = Question {
                question_text: format!("Sample question {}: which answer is correct?", i + 1),
                options: [
                    "First choice".to_string(),
                    "Second choice".to_string(),
                    "Third choice".to_string(),
                    "Fourth choice".to_string(),
                ],
                correct_answer: OptionLabel::ALL[i % 4],
                order_number: i as u32 + 1,
            };
            tables
                .test_questions
                .push(TestQuestion::new(practical.id, question));
        }
        tables.practicals.push(practical);

        tables
            .independent_work
            .push(IndependentWork::from_new(NewIndependentWork {
                title: "Write a CLI calculator".to_string(),
                content: "Parse two numbers and an operator from the arguments.".to_string(),
                order_number: 1,
                status: Status::Published,
                created_by: admin_id,
                ..Default::default()
            }));

        Self { tables }
    }

    fn lecture_mut(&mut self, id: Uuid) -> RepoResult<&mut Lecture> {
        self.tables
            .lectures
            .iter_mut()
            .find(|lecture| lecture.id == id)
            .ok_or(RepoError::not_found("lecture", id))
    }

    fn practical_mut(&mut self, id: Uuid) -> RepoResult<&mut Practical> {
        self.tables
            .practicals
            .iter_mut()
            .find(|practical| practical.id == id)
            .ok_or(RepoError::not_found("practical", id))
    }

    fn question_rows(practical_id: Uuid, questions: Vec<Question>) -> Vec<TestQuestion> {
        questions
            .into_iter()
            .enumerate()
            .map(|(index, mut question)| {
                question.order_number = index as u32 + 1;
                TestQuestion::new(practical_id, question)
            })
            .collect()
    }
}

fn sorted_by_order<T: Clone>(rows: &[T], order: impl Fn(&T) -> u32) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|row| order(row));
    rows
}

fn validate_questions(questions: &[Question]) -> RepoResult<()> {
    for question in questions {
        if question.question_text.trim().is_empty() {
            return Err(RepoError::Invalid(format!(
                "question {} has no text",
                question.order_number
            )));
        }
        if let Some(label) = OptionLabel::ALL
            .into_iter()
            .find(|label| question.option(*label).trim().is_empty())
        {
            return Err(RepoError::Invalid(format!(
                "question {} has an empty option {}",
                question.order_number, label
            )));
        }
    }
    Ok(())
}

impl Repository for MemoryRepository {
    fn profile(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        Ok(self.tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    fn students(&self) -> RepoResult<Vec<Profile>> {
        let mut students: Vec<Profile> = self
            .tables
            .profiles
            .iter()
            .filter(|p| p.is_student())
            .cloned()
            .collect();
        students.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(students)
    }

    fn admins(&self) -> RepoResult<Vec<Profile>> {
        let mut admins: Vec<Profile> = self
            .tables
            .profiles
            .iter()
            .filter(|p| p.role == Role::Admin)
            .cloned()
            .collect();
        admins.sort_by_key(|p| p.created_at);
        Ok(admins)
    }

    fn insert_profile(&mut self, profile: Profile) -> RepoResult<Profile> {
        let taken = self
            .tables
            .profiles
            .iter()
            .any(|p| p.id == profile.id || p.email.eq_ignore_ascii_case(&profile.email));
        if taken {
            return Err(RepoError::Invalid(format!(
                "a profile for {} already exists",
                profile.email
            )));
        }
        self.tables.profiles.push(profile.clone());
        Ok(profile)
    }

    fn update_profile(&mut self, id: Uuid, update: ProfileUpdate) -> RepoResult<Profile> {
        let profile = self
            .tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::not_found("profile", id))?;
        profile.apply(update);
        Ok(profile.clone())
    }

    fn delete_profile(&mut self, id: Uuid) -> RepoResult<()> {
        let before = self.tables.profiles.len();
        self.tables.profiles.retain(|p| p.id != id);
        if self.tables.profiles.len() == before {
            return Err(RepoError::not_found("profile", id));
        }

        self.tables.student_progress.retain(|p| p.student_id != id);
        self.tables.test_results.retain(|r| r.student_id != id);
        self.tables
            .independent_submissions
            .retain(|s| s.student_id != id);
        debug!(%id, "deleted profile and its records");
        Ok(())
    }

    fn lectures(&self) -> RepoResult<Vec<Lecture>> {
        Ok(sorted_by_order(&self.tables.lectures, |l| l.order_number))
    }

    fn lecture(&self, id: Uuid) -> RepoResult<Option<Lecture>> {
        Ok(self.tables.lectures.iter().find(|l| l.id == id).cloned())
    }

    fn published_lecture_by_order(&self, order_number: u32) -> RepoResult<Option<Lecture>> {
        Ok(self
            .tables
            .lectures
            .iter()
            .find(|l| l.order_number == order_number && l.status.is_published())
            .cloned())
    }

    fn insert_lecture(&mut self, lecture: NewLecture) -> RepoResult<Lecture> {
        let lecture = Lecture::from_new(lecture);
        self.tables.lectures.push(lecture.clone());
        Ok(lecture)
    }

    fn update_lecture(&mut self, id: Uuid, update: LectureUpdate) -> RepoResult<Lecture> {
        let lecture = self.lecture_mut(id)?;
        lecture.apply(update);
        Ok(lecture.clone())
    }

    fn delete_lecture(&mut self, id: Uuid) -> RepoResult<()> {
        let before = self.tables.lectures.len();
        self.tables.lectures.retain(|l| l.id != id);
        if self.tables.lectures.len() == before {
            return Err(RepoError::not_found("lecture", id));
        }
        self.tables.student_progress.retain(|p| p.lecture_id != id);
        Ok(())
    }

    fn practicals(&self) -> RepoResult<Vec<Practical>> {
        Ok(sorted_by_order(&self.tables.practicals, |p| p.order_number))
    }

    fn practical(&self, id: Uuid) -> RepoResult<Option<Practical>> {
        Ok(self.tables.practicals.iter().find(|p| p.id == id).cloned())
    }

    fn published_practical_by_order(&self, order_number: u32) -> RepoResult<Option<Practical>> {
        Ok(self
            .tables
            .practicals
            .iter()
            .find(|p| p.order_number == order_number && p.status.is_published())
            .cloned())
    }

    fn insert_practical(
        &mut self,
        practical: NewPractical,
        questions: Vec<Question>,
    ) -> RepoResult<Practical> {
        validate_questions(&questions)?;

        let practical = Practical::from_new(practical);
        let rows = Self::question_rows(practical.id, questions);
        debug!(id = %practical.id, questions = rows.len(), "inserting practical");

        self.tables.test_questions.extend(rows);
        self.tables.practicals.push(practical.clone());
        Ok(practical)
    }

    fn update_practical(
        &mut self,
        id: Uuid,
        update: PracticalUpdate,
        questions: Option<Vec<Question>>,
    ) -> RepoResult<Practical> {
        if let Some(questions) = &questions {
            validate_questions(questions)?;
        }

        let practical = self.practical_mut(id)?;
        practical.apply(update);
        let practical = practical.clone();

        if let Some(questions) = questions {
            self.tables.test_questions.retain(|q| q.practical_id != id);
            self.tables
                .test_questions
                .extend(Self::question_rows(id, questions));
        }

        Ok(practical)
    }

    fn delete_practical(&mut self, id: Uuid) -> RepoResult<()> {
        let before = self.tables.practicals.len();
        self.tables.practicals.retain(|p| p.id != id);
        if self.tables.practicals.len() == before {
            return Err(RepoError::not_found("practical", id));
        }
        self.tables.test_questions.retain(|q| q.practical_id != id);
        Ok(())
    }

    fn test_questions(&self, practical_id: Uuid) -> RepoResult<Vec<TestQuestion>> {
        let rows: Vec<TestQuestion> = self
            .tables
            .test_questions
            .iter()
            .filter(|q| q.practical_id == practical_id)
            .cloned()
            .collect();
        Ok(sorted_by_order(&rows, |q| q.order_number))
    }

    fn independent_works(&self) -> RepoResult<Vec<IndependentWork>> {
        Ok(sorted_by_order(&self.tables.independent_work, |w| {
            w.order_number
        }))
    }

    fn independent_work(&self, id: Uuid) -> RepoResult<Option<IndependentWork>> {
        Ok(self
            .tables
            .independent_work
            .iter()
            .find(|w| w.id == id)
            .cloned())
    }

    fn insert_independent_work(&mut self, work: NewIndependentWork) -> RepoResult<IndependentWork> {
        let work = IndependentWork::from_new(work);
        self.tables.independent_work.push(work.clone());
        Ok(work)
    }

    fn update_independent_work(
        &mut self,
        id: Uuid,
        update: IndependentWorkUpdate,
    ) -> RepoResult<IndependentWork> {
        let work = self
            .tables
            .independent_work
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(RepoError::not_found("independent work", id))?;
        work.apply(update);
        Ok(work.clone())
    }

    fn delete_independent_work(&mut self, id: Uuid) -> RepoResult<()> {
        let before = self.tables.independent_work.len();
        self.tables.independent_work.retain(|w| w.id != id);
        if self.tables.independent_work.len() == before {
            return Err(RepoError::not_found("independent work", id));
        }
        self.tables
            .independent_submissions
            .retain(|s| s.independent_work_id != id);
        Ok(())
    }

    fn submissions(&self, student_id: Uuid) -> RepoResult<Vec<IndependentSubmission>> {
        Ok(self
            .tables
            .independent_submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }

    fn submission(&self, id: Uuid) -> RepoResult<Option<IndependentSubmission>> {
        Ok(self
            .tables
            .independent_submissions
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    fn insert_submission(&mut self, submission: NewSubmission) -> RepoResult<IndependentSubmission> {
        if self.independent_work(submission.independent_work_id)?.is_none() {
            return Err(RepoError::not_found(
                "independent work",
                submission.independent_work_id,
            ));
        }

        let submission = IndependentSubmission {
            id: Uuid::new_v4(),
            student_id: submission.student_id,
            independent_work_id: submission.independent_work_id,
            submission_text: submission.submission_text,
            score: None,
            submitted_at: Utc::now(),
        };
        self.tables.independent_submissions.push(submission.clone());
        Ok(submission)
    }

    fn grade_submission(&mut self, id: Uuid, score: u32) -> RepoResult<IndependentSubmission> {
        let submission = self
            .tables
            .independent_submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RepoError::not_found("submission", id))?;
        submission.score = Some(score);
        Ok(submission.clone())
    }

    fn student_progress(&self, student_id: Uuid) -> RepoResult<Vec<StudentProgress>> {
        Ok(self
            .tables
            .student_progress
            .iter()
            .filter(|p| p.student_id == student_id)
            .cloned()
            .collect())
    }

    fn mark_lecture_complete(
        &mut self,
        student_id: Uuid,
        lecture_id: Uuid,
    ) -> RepoResult<StudentProgress> {
        if let Some(existing) = self
            .tables
            .student_progress
            .iter()
            .find(|p| p.student_id == student_id && p.lecture_id == lecture_id)
        {
            return Ok(existing.clone());
        }

        if self.lecture(lecture_id)?.is_none() {
            return Err(RepoError::not_found("lecture", lecture_id));
        }

        let progress = StudentProgress {
            id: Uuid::new_v4(),
            student_id,
            lecture_id,
            completed_at: Utc::now(),
        };
        self.tables.student_progress.push(progress.clone());
        Ok(progress)
    }

    fn test_result(&self, student_id: Uuid, practical_id: Uuid) -> RepoResult<Option<TestResult>> {
        Ok(self
            .tables
            .test_results
            .iter()
            .find(|r| r.student_id == student_id && r.practical_id == practical_id)
            .cloned())
    }

    fn test_results(&self, student_id: Uuid) -> RepoResult<Vec<TestResult>> {
        Ok(self
            .tables
            .test_results
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    fn all_test_results(&self) -> RepoResult<Vec<TestResult>> {
        Ok(self.tables.test_results.clone())
    }

    fn upsert_test_result(&mut self, result: NewTestResult) -> RepoResult<TestResult> {
        if self.practical(result.practical_id)?.is_none() {
            return Err(RepoError::not_found("practical", result.practical_id));
        }

        if let Some(existing) = self
            .tables
            .test_results
            .iter_mut()
            .find(|r| r.student_id == result.student_id && r.practical_id == result.practical_id)
        {
            existing.score = result.score;
            existing.answers = result.answers;
            existing.completed_at = Utc::now();
            debug!(id = %existing.id, score = existing.score, "updated test result");
            return Ok(existing.clone());
        }

        let created = TestResult {
            id: Uuid::new_v4(),
            student_id: result.student_id,
            practical_id: result.practical_id,
            score: result.score,
            answers: result.answers,
            completed_at: Utc::now(),
        };
        self.tables.test_results.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerSheet;

    fn question(n: u32) -> Question {
        Question {
            question_text: format!("Question {}", n),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: OptionLabel::A,
            order_number: n,
        }
    }

    fn new_practical(order: u32) -> NewPractical {
        NewPractical {
            title: format!("Practical {}", order),
            order_number: order,
            status: Status::Published,
            ..Default::default()
        }
    }

    #[test]
    fn test_demo_has_full_test() {
        let repo = MemoryRepository::demo();
        let practical = &repo.practicals().unwrap()[0];
        let questions = repo.test_questions(practical.id).unwrap();

        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0].correct_answer, OptionLabel::A);
        assert_eq!(questions[5].correct_answer, OptionLabel::B);
        assert_eq!(repo.students().unwrap().len(), 2);

        let admins = repo.admins().unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(practical.created_by, admins[0].id);
    }

    #[test]
    fn test_insert_practical_renumbers_questions() {
        let mut repo = MemoryRepository::new();
        let practical = repo
            .insert_practical(new_practical(1), vec![question(7), question(3)])
            .unwrap();

        let orders: Vec<u32> = repo
            .test_questions(practical.id)
            .unwrap()
            .iter()
            .map(|q| q.order_number)
            .collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_invalid_question_persists_nothing() {
        let mut repo = MemoryRepository::new();
        let mut broken = question(2);
        broken.options[3] = "  ".to_string();

        let result = repo.insert_practical(new_practical(1), vec![question(1), broken]);

        assert!(matches!(result, Err(RepoError::Invalid(_))));
        assert!(repo.practicals().unwrap().is_empty());
        assert!(repo.tables().test_questions.is_empty());
    }

    #[test]
    fn test_update_replaces_question_set() {
        let mut repo = MemoryRepository::new();
        let practical = repo
            .insert_practical(new_practical(1), vec![question(1), question(2)])
            .unwrap();

        let update = PracticalUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = repo
            .update_practical(practical.id, update, Some(vec![question(9)]))
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        let rows = repo.test_questions(practical.id).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question, "Question 9");
        assert_eq!(rows[0].order_number, 1);
    }

    #[test]
    fn test_update_without_questions_keeps_them() {
        let mut repo = MemoryRepository::new();
        let practical = repo
            .insert_practical(new_practical(1), vec![question(1)])
            .unwrap();

        repo.update_practical(practical.id, PracticalUpdate::default(), None)
            .unwrap();
        assert_eq!(repo.test_questions(practical.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_practical_cascades() {
        let mut repo = MemoryRepository::new();
        let kept = repo
            .insert_practical(new_practical(1), vec![question(1)])
            .unwrap();
        let removed = repo
            .insert_practical(new_practical(2), vec![question(1), question(2)])
            .unwrap();

        repo.delete_practical(removed.id).unwrap();

        assert_eq!(repo.practicals().unwrap().len(), 1);
        assert_eq!(repo.tables().test_questions.len(), 1);
        assert_eq!(repo.test_questions(kept.id).unwrap().len(), 1);
        assert!(matches!(
            repo.delete_practical(removed.id),
            Err(RepoError::NotFound { .. })
        ));
    }

    #[test]
    fn test_published_lookup_by_order() {
        let mut repo = MemoryRepository::new();
        repo.insert_practical(
            NewPractical {
                status: Status::Draft,
                ..new_practical(2)
            },
            vec![],
        )
        .unwrap();

        assert!(repo.published_practical_by_order(2).unwrap().is_none());

        let published = repo.insert_practical(new_practical(3), vec![]).unwrap();
        assert_eq!(
            repo.published_practical_by_order(3).unwrap().map(|p| p.id),
            Some(published.id)
        );
    }

    #[test]
    fn test_mark_lecture_complete_is_idempotent() {
        let mut repo = MemoryRepository::demo();
        let student = repo.students().unwrap()[0].id;
        let lecture = repo.lectures().unwrap()[0].id;

        let first = repo.mark_lecture_complete(student, lecture).unwrap();
        let second = repo.mark_lecture_complete(student, lecture).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.student_progress(student).unwrap().len(), 1);
    }

    #[test]
    fn test_upsert_keeps_one_result_per_practical() {
        let mut repo = MemoryRepository::demo();
        let student = repo.students().unwrap()[0].id;
        let practical = repo.practicals().unwrap()[0].id;

        let first = repo
            .upsert_test_result(NewTestResult {
                student_id: student,
                practical_id: practical,
                score: 4,
                answers: AnswerSheet::new(),
            })
            .unwrap();
        let second = repo
            .upsert_test_result(NewTestResult {
                student_id: student,
                practical_id: practical,
                score: 8,
                answers: AnswerSheet::new(),
            })
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.test_results(student).unwrap().len(), 1);
        assert_eq!(
            repo.test_result(student, practical).unwrap().map(|r| r.score),
            Some(8)
        );
    }

    #[test]
    fn test_delete_student_removes_records() {
        let mut repo = MemoryRepository::demo();
        let student = repo.students().unwrap()[0].id;
        let practical = repo.practicals().unwrap()[0].id;
        let lecture = repo.lectures().unwrap()[0].id;

        repo.mark_lecture_complete(student, lecture).unwrap();
        repo.upsert_test_result(NewTestResult {
            student_id: student,
            practical_id: practical,
            score: 7,
            answers: AnswerSheet::new(),
        })
        .unwrap();

        repo.delete_profile(student).unwrap();

        assert!(repo.profile(student).unwrap().is_none());
        assert!(repo.all_test_results().unwrap().is_empty());
        assert!(repo.student_progress(student).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut repo = MemoryRepository::demo();
        let result = repo.insert_profile(Profile::new("AZIZ@platform.uz", Role::Student));
        assert!(matches!(result, Err(RepoError::Invalid(_))));
    }

    #[test]
    fn test_submission_grading() {
        let mut repo = MemoryRepository::demo();
        let student = repo.students().unwrap()[0].id;
        let work = repo.independent_works().unwrap()[0].id;

        let submission = repo
            .insert_submission(NewSubmission {
                student_id: student,
                independent_work_id: work,
                submission_text: "Done".to_string(),
            })
            .unwrap();
        assert_eq!(submission.score, None);

        let graded = repo.grade_submission(submission.id, 90).unwrap();
        assert_eq!(graded.score, Some(90));
        assert_eq!(repo.submissions(student).unwrap()[0].score, Some(90));
    }
}
