use console::{measure_text_width, Style};

use crate::ranker::{NutrientRange, ScoreResult};
use crate::scoring::RuleScores;

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';
pub const TREE_VERT: char = '\u{2502}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 25;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn init_prefix() -> String {
    blue().apply_to("[INIT]").to_string()
}

fn warn_prefix() -> String {
    yellow().apply_to("[WARN]").to_string()
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn format_signed(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{}{:.2}", dim().apply_to(sign), value.abs())
}

pub fn log_init(menu_size: usize, feature_rows: usize, meal: &str) {
    println!(
        "{} loaded {} dishes, {} feature vectors",
        init_prefix(),
        bold().apply_to(menu_size),
        bold().apply_to(feature_rows),
    );
    println!(
        "{} scoring for {}",
        init_prefix(),
        cyan().apply_to(meal)
    );
}

pub fn log_filtered(kept: usize, total: usize) {
    println!(
        "{} {} of {} dishes fit the current meal time",
        init_prefix(),
        bold().apply_to(kept),
        dim().apply_to(total)
    );
}

pub fn log_menu_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("{} {}", warn_prefix(), yellow().apply_to(warning));
    }
}

pub fn log_no_behavior_vector(user_id: &str) {
    println!(
        "{} no usable interactions for {}; ranking on nutrition alone",
        warn_prefix(),
        dim().apply_to(user_id)
    );
}

fn rule_lines(rules: &RuleScores) -> Vec<(&'static str, f64)> {
    vec![
        ("protein ratio", rules.protein_overrule),
        ("low carbs", rules.low_carbs_overrule),
        ("low fat", rules.low_fat_overrule),
        ("sugar", rules.sugar_content),
        ("sodium", rules.sodium_content),
        ("saturated fat", rules.saturated_fat),
        ("cholesterol", rules.cholesterol),
        ("caloric density", rules.caloric_density),
        ("good fats", rules.good_fats),
    ]
}

/// Full per-dish tree: the three scorers, the nine rules, and the blended
/// totals.
pub fn print_dish_breakdown(result: &ScoreResult) {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {}",
        magenta().apply_to(bold().apply_to("[DISH]")),
        bold().apply_to(&result.dish_name)
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SCORERS")));
    let scorers = [
        ("density", result.breakdown.density),
        ("satiety", result.breakdown.satiety),
        ("euclidean", result.breakdown.euclidean),
    ];
    let count = scorers.len();
    for (i, (label, value)) in scorers.iter().enumerate() {
        let branch = if i == count - 1 {
            tree_end()
        } else {
            tree_branch()
        };
        lines.push(format!("{}{}{:.2}", branch, pad_label(label, 1), value));
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("RULES")));
    let rules = rule_lines(&result.breakdown.rules);
    let count = rules.len();
    for (i, (label, value)) in rules.iter().enumerate() {
        let branch = if i == count - 1 {
            tree_end()
        } else {
            tree_branch()
        };
        let style = if *value >= 80.0 {
            green()
        } else if *value < 50.0 {
            yellow()
        } else {
            dim()
        };
        lines.push(format!(
            "{}{}{}",
            branch,
            pad_label(label, 1),
            style.apply_to(format!("{value:.0}"))
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("RESULT")));
    lines.push(format!(
        "{}{}{:.2}",
        tree_branch(),
        pad_label("base", 1),
        result.base_score
    ));
    lines.push(format!(
        "{}{}{}",
        tree_branch(),
        pad_label("similarity", 1),
        format_signed(result.cosine_score)
    ));
    lines.push(format!(
        "{}{}{}",
        tree_end(),
        pad_label("final", 1),
        bold().apply_to(format!("{:.2}", result.final_score))
    ));

    println!("{}\n", lines.join("\n"));
}

/// The ranked list, best first, with the similarity contribution dimmed.
pub fn print_ranked_results(results: &[ScoreResult]) {
    println!("{}", bold().apply_to("RANKED MENU"));
    let count = results.len();
    for (i, result) in results.iter().enumerate() {
        let branch = if i == count - 1 {
            tree_end()
        } else {
            tree_branch()
        };
        println!(
            "{}{}{} {}",
            branch,
            pad_label(&format!("{}. {}", i + 1, result.dish_name), 1),
            bold().apply_to(format!("{:.2}", result.final_score)),
            dim().apply_to(format!(
                "(base {:.2}, cos {:.3})",
                result.base_score, result.cosine_score
            ))
        );
    }
    if count == 0 {
        println!("{}{}", tree_end(), dim().apply_to("nothing to rank"));
    }
}

pub fn log_timing_suggestions(meal: &str, timings: &[&str], dish_types: &[&str]) {
    println!("{} {}", bold().apply_to("MEAL TIME"), cyan().apply_to(meal));
    println!(
        "{}{}{}",
        tree_branch(),
        pad_label("timing labels", 1),
        dim().apply_to(timings.join(", "))
    );
    println!(
        "{}{}{}",
        tree_end(),
        pad_label("dish types", 1),
        dim().apply_to(dish_types.join(", "))
    );
}

/// Min/max macro amounts across the scorable menu.
pub fn print_nutrient_ranges(range: &NutrientRange) {
    let fields = [
        ("energy", range.min.energy, range.max.energy),
        ("proteins", range.min.proteins, range.max.proteins),
        ("carbs", range.min.carbs, range.max.carbs),
        ("fats", range.min.fats, range.max.fats),
        ("fibers", range.min.fibers, range.max.fibers),
    ];
    println!("{}", bold().apply_to("MENU NUTRIENTS"));
    let count = fields.len();
    for (i, (label, min, max)) in fields.iter().enumerate() {
        let branch = if i == count - 1 {
            tree_end()
        } else {
            tree_branch()
        };
        println!(
            "{}{}{}",
            branch,
            pad_label(label, 1),
            dim().apply_to(format!("{min:.0} to {max:.0}"))
        );
    }
}
