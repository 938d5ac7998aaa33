use anyhow::Result;
use chrono::{Local, NaiveTime};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dishrank::features::FeatureTable;
use dishrank::goal::{HungerLevel, UserGoal};
use dishrank::interactions::{build_user_vector, load_interaction_log};
use dishrank::menu::{load_menu, Dish};
use dishrank::policy::Policy;
use dishrank::ranker::{goal_coverage_warnings, nutrient_extremes, rank_menu};
use dishrank::timing::{
    filter_menu, infer_meal_time, matching_timing_categories, suggested_meal_categories,
};
use dishrank::utils::{
    log_filtered, log_init, log_menu_warnings, log_no_behavior_vector, log_timing_suggestions,
    print_nutrient_ranges, print_ranked_results,
};

fn print_usage() {
    eprintln!("Usage: dishrank <menu.json> <features.csv> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --interactions <file>  JSON interaction log");
    eprintln!("  --user <id>            user to personalize for (requires --interactions)");
    eprintln!("  --time <HH:MM>         wall-clock time to rank for (default: now)");
    eprintln!("  --hunger <level>       High, Medium or Low (default: Medium)");
    eprintln!("  --policy <file>        RON policy file overriding the defaults");
    eprintln!("  --proteins <g>         protein goal in grams");
    eprintln!("  --carbs <g>            carbs goal in grams");
    eprintln!("  --fats <g>             fats goal in grams");
    eprintln!("  --fibers <g>           fiber goal in grams");
    eprintln!("  --energy <kcal>        energy goal in kcal");
    eprintln!("  --all                  skip the meal-time filter");
    eprintln!("  --json                 print results as JSON instead of a table");
}

struct Args {
    menu_path: PathBuf,
    features_path: PathBuf,
    interactions_path: Option<PathBuf>,
    user_id: Option<String>,
    time: Option<NaiveTime>,
    hunger: HungerLevel,
    policy_path: Option<PathBuf>,
    goal: UserGoal,
    all: bool,
    json: bool,
}

fn parse_args() -> Option<Args> {
    let raw: Vec<String> = env::args().skip(1).collect();
    let mut positional: Vec<String> = Vec::new();
    let mut interactions_path = None;
    let mut user_id = None;
    let mut time = None;
    let mut hunger = HungerLevel::default();
    let mut policy_path = None;
    let mut goal = UserGoal::default();
    let mut all = false;
    let mut json = false;

    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--interactions" => interactions_path = Some(PathBuf::from(iter.next()?)),
            "--user" => user_id = Some(iter.next()?),
            "--time" => {
                time = Some(NaiveTime::parse_from_str(&iter.next()?, "%H:%M").ok()?);
            }
            "--hunger" => hunger = HungerLevel::parse(&iter.next()?),
            "--policy" => policy_path = Some(PathBuf::from(iter.next()?)),
            "--proteins" => goal.proteins = iter.next()?.parse().ok()?,
            "--carbs" => goal.carbs = iter.next()?.parse().ok()?,
            "--fats" => goal.fats = iter.next()?.parse().ok()?,
            "--fibers" => goal.fibers = iter.next()?.parse().ok()?,
            "--energy" => goal.energy = iter.next()?.parse().ok()?,
            "--all" => all = true,
            "--json" => json = true,
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        return None;
    }
    let mut positional = positional.into_iter();
    Some(Args {
        menu_path: PathBuf::from(positional.next()?),
        features_path: PathBuf::from(positional.next()?),
        interactions_path,
        user_id,
        time,
        hunger,
        policy_path,
        goal,
        all,
        json,
    })
}

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("dishrank=info".parse()?))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        );
    set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let Some(args) = parse_args() else {
        print_usage();
        process::exit(1);
    };

    let policy = match &args.policy_path {
        Some(path) => Policy::from_path(path)?,
        None => Policy::load_from_files(),
    };

    let menu = load_menu(&args.menu_path)?;
    let table = FeatureTable::from_csv_path(&args.features_path)?;

    let time = args.time.unwrap_or_else(|| Local::now().time());
    let meal = infer_meal_time(time);

    if !args.json {
        log_init(menu.len(), table.len(), &meal.to_string());
        log_timing_suggestions(
            &meal.to_string(),
            matching_timing_categories(meal),
            suggested_meal_categories(meal),
        );
    }

    let candidates: Vec<&Dish> = if args.all {
        menu.iter().collect()
    } else {
        filter_menu(&menu, meal)
    };
    if !args.json {
        log_filtered(candidates.len(), menu.len());
        if let Some(range) = nutrient_extremes(&menu) {
            print_nutrient_ranges(&range);
            log_menu_warnings(&goal_coverage_warnings(&range, &args.goal));
        }
    }

    let user_vector = match (&args.interactions_path, &args.user_id) {
        (Some(path), Some(user_id)) => {
            let log = load_interaction_log(path)?;
            let vector = build_user_vector(&log, user_id, &table, &policy.actions);
            if vector.is_none() && !args.json {
                log_no_behavior_vector(user_id);
            }
            vector
        }
        _ => None,
    };

    let mut results = rank_menu(
        &candidates,
        args.hunger,
        &args.goal,
        &policy,
        &table,
        user_vector.as_deref(),
    );
    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_ranked_results(&results);
    }

    Ok(())
}
