//! The `practicum take` command.

use anyhow::{Context, Result, bail};
use practicum::{Config, Repository, TestSession};
use uuid::Uuid;

pub fn execute(
    repo: &mut dyn Repository,
    config: &Config,
    practical: Option<Uuid>,
    student: Option<Uuid>,
) -> Result<()> {
    let practical_id = match practical {
        Some(id) => id,
        None => match repo.practicals()?.into_iter().find(|p| p.status.is_published()) {
            Some(practical) => practical.id,
            None => bail!("no published practical to take"),
        },
    };
    let student_id = match student {
        Some(id) => id,
        None => match repo.students()?.into_iter().next() {
            Some(student) => student.id,
            None => bail!("no students in the course"),
        },
    };

    let session = TestSession::open(repo, config.grading(), student_id, practical_id)?;
    let outcome = session.run().context("test session failed")?;

    match outcome {
        Some(outcome) => {
            println!(
                "Recorded {}/{} ({}).",
                outcome.result.score,
                outcome.total,
                if outcome.passed { "passed" } else { "not passed" }
            );
            if let Some(lecture) = outcome.unlocked_lecture {
                println!("Unlocked lecture: {}", lecture.title);
            }
        }
        None => println!("Left without finishing, nothing recorded."),
    }
    Ok(())
}
