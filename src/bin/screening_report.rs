use carengrow_core::domains::settings::MetricsConfig;
use carengrow_core::domains::child::fixtures::SAMPLE_CHILD_ID;
use carengrow_core::format::{format_age_display, format_gap, trend_symbol, ReadinessBand};
use carengrow_core::globals;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧒 Screening Report Tool");
    println!("========================");

    let child_id = env::args().nth(1).unwrap_or_else(|| SAMPLE_CHILD_ID.to_string());

    globals::initialize(MetricsConfig::from_env()?)?;
    let development = globals::get_development_service()?;
    let report = development.child_report(&child_id)?;
    let child = &report.child;

    println!("\n📋 CHILD");
    println!("  {} ({})", child.name, child.id);
    println!(
        "  Age: {} | {} | {}",
        format_age_display(child.age_in_months),
        child.gender.as_str(),
        child.status.as_str()
    );
    println!("  Anganwadi: {}", child.anganwadi_center.name);

    println!("\n📐 DEVELOPMENTAL AGES");
    for age in &report.developmental_ages {
        println!(
            "  {:<26} {:>5} vs {:>5}  {:<12} {}",
            age.domain,
            age.developmental_age_months,
            age.chronological_age_months,
            format_gap(age.gap_months),
            age.status
        );
    }

    let stats = &report.consolidated_stats;
    println!("\n📊 CONSOLIDATED");
    println!("  Overall developmental age: {} months", stats.overall_developmental_age);
    println!("  Overall gap: {}", format_gap(stats.overall_gap));
    println!("  Development: {}%", stats.overall_development_percentage);
    println!(
        "  Concerns: {} | On track: {} | Risk: {:?}",
        stats.areas_of_concern, stats.areas_on_track, stats.risk_level
    );

    println!("\n📈 DQ BY SCREENING");
    for point in &report.dq_series {
        let values: Vec<String> = point.dq.iter().map(|(d, dq)| format!("{}={}", d, dq)).collect();
        println!("  #{} {} ({}): {}", point.screening_number, point.date, point.screening, values.join(", "));
    }
    for period in &report.dq_changes {
        println!("  {} [{}]", period.period, period.timespan);
        for (domain, change) in &period.changes {
            println!(
                "    {} {} {} -> {} ({:+})",
                trend_symbol(change.trend),
                domain,
                change.previous,
                change.current,
                change.change
            );
        }
    }

    let overall = &report.intervention_targets.overall;
    println!("\n🎯 TARGETS");
    println!("  DQ {} -> {} (growth {} months)", overall.current_dq, overall.target_dq, overall.required_growth);
    println!(
        "  School readiness {} ({}) -> projected {} of {}",
        overall.current_school_readiness,
        ReadinessBand::from_score(overall.current_school_readiness).label(),
        overall.projected_school_readiness,
        overall.target_school_readiness
    );
    for target in &report.intervention_targets.domain_targets {
        let first = target
            .recommended_touchpoints
            .first()
            .map(|t| t.intervention.name.as_str())
            .unwrap_or("none");
        println!("  {:<26} DQ {} -> {}  first: {}", target.domain, target.current_dq, target.target_dq, first);
    }

    println!("\n🗓️  TIMELINE");
    println!(
        "  {} events, {} completed, {} scheduled",
        report.timeline.total_events, report.timeline.completed, report.timeline.scheduled
    );

    match &report.referral {
        Some(referral) => {
            println!("\n🏥 REFERRAL JOURNEY");
            if let Some(progress) = &referral.progress {
                println!(
                    "  {}% complete, current step {:?}",
                    progress.completion_percentage, progress.current_step
                );
            }
        }
        None => println!("\n🏥 Not eligible for the referral journey"),
    }

    println!("\n✅ REPORT COMPLETE");
    Ok(())
}
