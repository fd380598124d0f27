//! Read-only course reports: students, rankings, stats, dashboard.

use anyhow::Result;
use practicum::Repository;
use practicum::service::stats;
use serde::Serialize;
use uuid::Uuid;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn students(repo: &dyn Repository) -> Result<()> {
    for student in repo.students()? {
        println!("{}  {} <{}>", student.id, student.display_name(), student.email);
    }
    Ok(())
}

pub fn rankings(repo: &dyn Repository, json: bool) -> Result<()> {
    let rankings = stats::student_rankings(repo)?;
    if json {
        return print_json(&rankings);
    }

    if rankings.is_empty() {
        println!("No test results yet.");
    }
    for ranking in &rankings {
        println!(
            "{:>3}. {:<24} {:>4} pts  {} test(s)  avg {:.1}",
            ranking.rank, ranking.name, ranking.total_score, ranking.test_count, ranking.average_score
        );
    }
    Ok(())
}

pub fn stats(repo: &dyn Repository, json: bool) -> Result<()> {
    let stats = stats::admin_stats(repo)?;
    if json {
        return print_json(&stats);
    }

    println!("Students:          {}", stats.total_students);
    println!("Lectures:          {}", stats.total_lectures);
    println!("Practicals:        {}", stats.total_practicals);
    println!("Independent work:  {}", stats.total_independent_work);
    println!("Average score:     {:.1}", stats.average_score);
    println!("Completion rate:   {:.0}%", stats.completion_rate);
    Ok(())
}

pub fn dashboard(repo: &dyn Repository, student: Uuid, json: bool) -> Result<()> {
    let dashboard = stats::student_dashboard(repo, student)?;
    if json {
        return print_json(&dashboard);
    }

    println!(
        "Lectures:          {}/{}",
        dashboard.completed_lectures, dashboard.total_lectures
    );
    println!(
        "Practicals:        {}/{}",
        dashboard.completed_practicals, dashboard.total_practicals
    );
    println!(
        "Independent work:  {}/{}",
        dashboard.completed_independent_work, dashboard.total_independent_work
    );
    println!("Average score:     {:.1}", dashboard.average_score);
    println!("Rank:              {}", dashboard.rank);
    Ok(())
}
