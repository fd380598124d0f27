//! Course statistics, student rankings and the student dashboard.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::data::Repository;
use crate::error::Result;
use crate::models::TestResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_students: usize,
    pub total_lectures: usize,
    pub total_practicals: usize,
    pub total_independent_work: usize,
    pub average_score: f64,
    /// Share of students with at least one test result, in percent.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub rank: usize,
    pub student_id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub total_score: u32,
    pub test_count: usize,
    pub average_score: f64,
}

/// Where a student stands among everyone with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankTier {
    Top10,
    Top25,
    Top50,
    Position { rank: usize, of: usize },
    Unranked,
}

impl RankTier {
    pub fn from_position(rank: usize, of: usize) -> Self {
        if rank == 0 || of == 0 {
            return RankTier::Unranked;
        }

        let percentile = rank as f64 / of as f64 * 100.0;
        if percentile <= 10.0 {
            RankTier::Top10
        } else if percentile <= 25.0 {
            RankTier::Top25
        } else if percentile <= 50.0 {
            RankTier::Top50
        } else {
            RankTier::Position { rank, of }
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankTier::Top10 => write!(f, "Top 10%"),
            RankTier::Top25 => write!(f, "Top 25%"),
            RankTier::Top50 => write!(f, "Top 50%"),
            RankTier::Position { rank, of } => write!(f, "{}/{}", rank, of),
            RankTier::Unranked => write!(f, "unranked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDashboard {
    pub total_lectures: usize,
    pub completed_lectures: usize,
    pub total_practicals: usize,
    pub completed_practicals: usize,
    pub total_independent_work: usize,
    pub completed_independent_work: usize,
    pub average_score: f64,
    pub rank: RankTier,
}

fn average_score(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: u32 = results.iter().map(|r| r.score).sum();
    total as f64 / results.len() as f64
}

pub fn admin_stats<R: Repository + ?Sized>(repo: &R) -> Result<AdminStats> {
    let total_students = repo.students()?.len();
    let total_lectures = repo
        .lectures()?
        .iter()
        .filter(|l| l.status.is_published())
        .count();
    let total_practicals = repo
        .practicals()?
        .iter()
        .filter(|p| p.status.is_published())
        .count();
    let total_independent_work = repo
        .independent_works()?
        .iter()
        .filter(|w| w.status.is_published())
        .count();

    let results = repo.all_test_results()?;
    let students_with_results: HashSet<Uuid> = results.iter().map(|r| r.student_id).collect();
    let completion_rate = if total_students > 0 {
        students_with_results.len() as f64 / total_students as f64 * 100.0
    } else {
        0.0
    };

    Ok(AdminStats {
        total_students,
        total_lectures,
        total_practicals,
        total_independent_work,
        average_score: average_score(&results),
        completion_rate,
    })
}

/// Students with results, highest total score first. Ties go to the higher
/// average, then alphabetically by name, then by id.
pub fn student_rankings<R: Repository + ?Sized>(repo: &R) -> Result<Vec<Ranking>> {
    let mut totals: HashMap<Uuid, (u32, usize)> = HashMap::new();
    for result in repo.all_test_results()? {
        let entry = totals.entry(result.student_id).or_default();
        entry.0 += result.score;
        entry.1 += 1;
    }

    let mut rankings = Vec::with_capacity(totals.len());
    for (student_id, (total_score, test_count)) in totals {
        let Some(profile) = repo.profile(student_id)? else {
            continue;
        };
        rankings.push(Ranking {
            rank: 0,
            student_id,
            name: profile.display_name(),
            avatar_url: profile.avatar_url,
            total_score,
            test_count,
            average_score: total_score as f64 / test_count as f64,
        });
    }

    rankings.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| b.average_score.total_cmp(&a.average_score))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.student_id.cmp(&b.student_id))
    });
    for (index, ranking) in rankings.iter_mut().enumerate() {
        ranking.rank = index + 1;
    }

    Ok(rankings)
}

pub fn student_dashboard<R: Repository + ?Sized>(
    repo: &R,
    student_id: Uuid,
) -> Result<StudentDashboard> {
    let results = repo.test_results(student_id)?;
    let rankings = student_rankings(repo)?;
    let rank = rankings
        .iter()
        .find(|r| r.student_id == student_id)
        .map_or(RankTier::Unranked, |r| {
            RankTier::from_position(r.rank, rankings.len())
        });

    Ok(StudentDashboard {
        total_lectures: repo
            .lectures()?
            .iter()
            .filter(|l| l.status.is_published())
            .count(),
        completed_lectures: repo.student_progress(student_id)?.len(),
        total_practicals: repo
            .practicals()?
            .iter()
            .filter(|p| p.status.is_published())
            .count(),
        completed_practicals: results.len(),
        total_independent_work: repo
            .independent_works()?
            .iter()
            .filter(|w| w.status.is_published())
            .count(),
        completed_independent_work: repo.submissions(student_id)?.len(),
        average_score: average_score(&results),
        rank,
    })
}
