use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::Table;

use crate::core::food::{DaySummary, WeeklyAverage};
use crate::core::monthly::{MonthlyBucket, MonthlyComparison};
use crate::core::projection::{GoalProgress, Projection};
use crate::core::summary::Summary;
use crate::core::trend::{DayBalance, DayClassification, MaintenanceEstimate, TrendPoint};
use crate::core::units::{display_weight, display_weight_delta, display_whole, weight_unit};
use crate::models::config::Units;
use crate::models::food::{CatalogItem, FoodEntry, Macros};
use crate::models::observation::Observation;

const PROGRESS_BAR_WIDTH: usize = 20;

pub fn format_observation(o: &Observation, units: &Units) -> String {
    let (w, unit) = display_weight(o.weight_kg(), units);
    format!(
        "{} | {:.1} {} | {} kcal",
        o.date(),
        w,
        unit,
        display_whole(o.kcal())
    )
}

pub fn format_balance(balance: DayBalance) -> String {
    match balance {
        DayBalance::Deficit => "deficit".green().to_string(),
        DayBalance::Surplus => "surplus".red().to_string(),
        DayBalance::Neutral => "neutral".yellow().to_string(),
    }
}

pub fn format_trend(points: &[TrendPoint], units: &Units) -> String {
    let unit = weight_unit(units);
    let mut table = Table::new();
    table.set_header(vec![
        "Date".to_string(),
        format!("Weight ({})", unit),
        format!("Trend ({})", unit),
    ]);
    for p in points {
        table.add_row(vec![
            p.date.to_string(),
            format!("{:.1}", display_weight(p.weight_kg, units).0),
            format!("{:.1}", display_weight(p.trend_kg, units).0),
        ]);
    }
    table.to_string()
}

pub fn format_estimate(e: &MaintenanceEstimate, units: &Units) -> String {
    let (trend, unit) = display_weight(e.trend_weight, units);
    let mut out = String::new();
    out.push_str(&format!("Trend weight:      {:.1} {}\n", trend, unit));
    out.push_str(&format!(
        "Maintenance:       {} kcal\n",
        display_whole(e.maintenance_kcal)
    ));
    out.push_str(&format!(
        "Average intake:    {} kcal ({} to {}, {} entries)\n",
        display_whole(e.avg_kcal),
        e.recent_from,
        e.recent_to,
        e.recent_count
    ));
    out.push_str(&format!(
        "Weight change:     {:+.1} {} over {} day(s)",
        display_weight_delta(e.weight_delta_kg, units),
        unit,
        e.days
    ));
    out
}

pub fn format_days(days: &[DayClassification]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Kcal", "Deficit", "Balance"]);
    for d in days {
        table.add_row(vec![
            d.date.to_string(),
            format!("{}", display_whole(d.kcal)),
            format!("{:+}", display_whole(d.deficit)),
            format_balance(d.balance),
        ]);
    }
    table.to_string()
}

fn month_name(b: &MonthlyBucket) -> String {
    NaiveDate::from_ymd_opt(b.year, b.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| b.label.clone())
}

pub fn format_monthly(m: &MonthlyComparison, units: &Units) -> String {
    let unit = weight_unit(units);
    let mut lines = Vec::new();
    for (pair, delta) in m.buckets.windows(2).zip(&m.deltas) {
        let (prev, cur) = (&pair[0], &pair[1]);
        lines.push(format!("{} -> {}:", month_name(prev), month_name(cur)));
        lines.push(format!(
            "  - Weight: {:.1} {} -> {:.1} {} (delta {:+.1} {})",
            display_weight(prev.mean_weight, units).0,
            unit,
            display_weight(cur.mean_weight, units).0,
            unit,
            display_weight_delta(delta.weight_delta, units),
            unit
        ));
        lines.push(format!(
            "  - Kcal: {} -> {} (delta {:+})",
            display_whole(prev.mean_kcal),
            display_whole(cur.mean_kcal),
            display_whole(delta.kcal_delta)
        ));
    }
    lines.join("\n")
}

pub fn format_projection(p: &Projection) -> String {
    match p {
        Projection::Days(d) if *d == 0.0 => "reached at current pace".to_string(),
        Projection::Days(d) => format!("~{} days", d.ceil()),
        Projection::Undefined => "no projection (weight is not changing)".to_string(),
    }
}

fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

pub fn format_goal(g: &GoalProgress, units: &Units) -> String {
    let (target, unit) = display_weight(g.target_weight_kg, units);
    let met = if g.is_met {
        "MET".green().to_string()
    } else {
        "...".to_string()
    };
    format!(
        "[{}] {}: {:.1} {} {} {:.0}% | {}",
        met,
        g.label,
        target,
        unit,
        progress_bar(g.progress),
        g.progress * 100.0,
        format_projection(&g.days_to_goal)
    )
}

fn macros_row(label: &str, m: &Macros) -> Vec<String> {
    vec![
        label.to_string(),
        String::new(),
        String::new(),
        format!("{}", display_whole(m.kcal)),
        format!("{}", display_whole(m.protein_g)),
        format!("{}", display_whole(m.carbs_g)),
        format!("{}", display_whole(m.fat_g)),
    ]
}

pub fn format_food(e: &FoodEntry) -> String {
    format!(
        "{} | {} | {} {}g | {} kcal, {} g protein, {} g carbs, {} g fat  [{}]",
        e.date,
        e.meal,
        e.label(),
        display_whole(e.grams),
        display_whole(e.totals.kcal),
        display_whole(e.totals.protein_g),
        display_whole(e.totals.carbs_g),
        display_whole(e.totals.fat_g),
        e.id
    )
}

pub fn format_day_summary(s: &DaySummary) -> String {
    if s.is_empty() {
        return format!("No food logged for {}.", s.date);
    }
    let mut table = Table::new();
    table.set_header(vec!["Meal", "Food", "Grams", "Kcal", "Protein", "Carbs", "Fat"]);
    for group in &s.meals {
        if group.entries.is_empty() {
            table.add_row(vec![group.meal.to_string(), "-".to_string()]);
            continue;
        }
        for e in &group.entries {
            table.add_row(vec![
                group.meal.to_string(),
                e.label(),
                format!("{}", display_whole(e.grams)),
                format!("{}", display_whole(e.totals.kcal)),
                format!("{}", display_whole(e.totals.protein_g)),
                format!("{}", display_whole(e.totals.carbs_g)),
                format!("{}", display_whole(e.totals.fat_g)),
            ]);
        }
    }
    table.add_row(macros_row("Total", &s.totals));
    table.add_row(macros_row("Target", &s.targets));
    table.add_row(macros_row("Remaining", &s.remaining));
    format!("--- {} ---\n{}", s.date, table)
}

pub fn format_weekly(w: &WeeklyAverage) -> String {
    format!(
        "{} to {} ({} day(s) logged)\n  Kcal/day: {}\n  Protein/day: {} g\n  Carbs/day: {} g\n  Fat/day: {} g",
        w.from,
        w.to,
        w.days_logged,
        display_whole(w.daily_average.kcal),
        display_whole(w.daily_average.protein_g),
        display_whole(w.daily_average.carbs_g),
        display_whole(w.daily_average.fat_g)
    )
}

pub fn format_catalog(items: &[CatalogItem]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Food", "Kcal/100g", "Protein", "Carbs", "Fat"]);
    for i in items {
        table.add_row(vec![
            i.label(),
            format!("{}", i.per_100g.kcal),
            format!("{}", i.per_100g.protein_g),
            format!("{}", i.per_100g.carbs_g),
            format!("{}", i.per_100g.fat_g),
        ]);
    }
    table.to_string()
}

pub fn format_summary(s: &Summary, units: &Units) -> String {
    let mut out = format!(
        "=== Pocket Diet: {} to {} ({} entries) ===\n\n",
        s.from, s.to, s.observations
    );
    out.push_str(&format_estimate(&s.maintenance, units));
    out.push_str(&format!(
        "\nLatest day ({}):   {} kcal, {} {:+} kcal\n",
        s.latest.date,
        display_whole(s.latest.kcal),
        format_balance(s.latest.balance),
        display_whole(s.latest.deficit)
    ));

    out.push_str("\nMonthly comparison\n");
    match &s.monthly {
        Some(m) => out.push_str(&format_monthly(m, units)),
        None => out.push_str("Not enough data for a monthly comparison."),
    }

    out.push_str("\n\nGoals\n");
    if s.goals.is_empty() {
        out.push_str("No goals configured.");
    } else {
        let lines: Vec<String> = s.goals.iter().map(|g| format_goal(g, units)).collect();
        out.push_str(&lines.join("\n"));
    }
    out
}
