use dishrank::features::FeatureTable;
use dishrank::goal::{HungerLevel, UserGoal};
use dishrank::menu::load_menu;
use dishrank::policy::Policy;
use dishrank::ranker::rank_menu;
use dishrank::utils::print_dish_breakdown;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn print_usage() {
    eprintln!("Usage: score-dish <menu.json> <dish name> [--hunger <level>] [--policy <file>]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <menu.json>   menu document to read the dish from");
    eprintln!("  <dish name>   exact dish name; quote names with spaces");
    eprintln!("  --hunger      High, Medium or Low (default: Medium)");
    eprintln!("  --policy      RON policy file overriding the defaults");
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut positional: Vec<String> = Vec::new();
    let mut hunger = HungerLevel::default();
    let mut policy_path: Option<PathBuf> = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--hunger" => match iter.next() {
                Some(level) => hunger = HungerLevel::parse(&level),
                None => {
                    print_usage();
                    process::exit(1);
                }
            },
            "--policy" => match iter.next() {
                Some(path) => policy_path = Some(PathBuf::from(path)),
                None => {
                    print_usage();
                    process::exit(1);
                }
            },
            _ => positional.push(arg),
        }
    }

    if positional.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let menu_path = positional[0].clone();
    let dish_name = positional[1..].join(" ");

    let policy = match policy_path {
        Some(path) => match Policy::from_path(&path) {
            Ok(policy) => policy,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => Policy::load_from_files(),
    };

    let menu = match load_menu(Path::new(&menu_path)) {
        Ok(menu) => menu,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let Some(dish) = menu.iter().find(|d| d.dish_name == dish_name) else {
        eprintln!("dish '{dish_name}' is not on the menu");
        let mut names: Vec<&str> = menu.iter().map(|d| d.dish_name.as_str()).collect();
        names.sort_unstable();
        eprintln!("available: {}", names.join(", "));
        process::exit(1);
    };

    // no behavior vector here, so the breakdown shows nutrition only
    let results = rank_menu(
        &[dish],
        hunger,
        &UserGoal::default(),
        &policy,
        &FeatureTable::default(),
        None,
    );
    print_dish_breakdown(&results[0]);
}
