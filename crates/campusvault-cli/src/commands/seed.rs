//! Seed the standard subject catalog.

use clap::Args;

use crate::output;
use campusvault_core::error::AppError;
use campusvault_database::repositories::subject::SubjectRepository;
use campusvault_entity::subject::{branch, CreateSubject};

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Seed even if subjects already exist
    #[arg(long)]
    pub force: bool,
}

/// The standard catalog: (name, code, year, semester, icon).
const CATALOG: &[(&str, &str, i32, i32, &str)] = &[
    // 1st year, semester 1
    ("Mathematics I", "MA101", 1, 1, "fas fa-calculator"),
    ("Physics", "PH101", 1, 1, "fas fa-atom"),
    ("Programming Fundamentals", "CS101", 1, 1, "fas fa-code"),
    ("English Communication", "EN101", 1, 1, "fas fa-book-open"),
    ("Engineering Drawing", "ME101", 1, 1, "fas fa-drafting-compass"),
    // 1st year, semester 2
    ("Mathematics II", "MA102", 1, 2, "fas fa-calculator"),
    ("Chemistry", "CH101", 1, 2, "fas fa-flask"),
    ("Data Structures", "CS102", 1, 2, "fas fa-project-diagram"),
    ("Digital Logic", "CS103", 1, 2, "fas fa-microchip"),
    ("Environmental Science", "ES101", 1, 2, "fas fa-leaf"),
    // 2nd year, semester 1
    ("Algorithms", "CS201", 2, 1, "fas fa-sitemap"),
    ("Computer Organization", "CS202", 2, 1, "fas fa-memory"),
    ("Object Oriented Programming", "CS203", 2, 1, "fas fa-object-group"),
    ("Database Systems", "CS204", 2, 1, "fas fa-database"),
    ("Discrete Mathematics", "MA201", 2, 1, "fas fa-infinity"),
    // 2nd year, semester 2
    ("Operating Systems", "CS205", 2, 2, "fas fa-desktop"),
    ("Computer Networks", "CS206", 2, 2, "fas fa-network-wired"),
    ("Software Engineering", "CS207", 2, 2, "fas fa-tools"),
    ("Web Development", "CS208", 2, 2, "fas fa-globe"),
    ("Statistics", "MA202", 2, 2, "fas fa-chart-bar"),
    // 3rd year, semester 1
    ("Artificial Intelligence", "CS301", 3, 1, "fas fa-robot"),
    ("Machine Learning", "CS302", 3, 1, "fas fa-brain"),
    ("Compiler Design", "CS303", 3, 1, "fas fa-cog"),
    ("Computer Graphics", "CS304", 3, 1, "fas fa-paint-brush"),
    ("Cybersecurity", "CS305", 3, 1, "fas fa-shield-alt"),
    // 3rd year, semester 2
    ("Distributed Systems", "CS306", 3, 2, "fas fa-server"),
    ("Cloud Computing", "CS307", 3, 2, "fas fa-cloud"),
    ("Mobile App Development", "CS308", 3, 2, "fas fa-mobile-alt"),
    ("Data Mining", "CS309", 3, 2, "fas fa-search"),
    ("Human Computer Interaction", "CS310", 3, 2, "fas fa-users"),
    // 4th year, semester 1
    ("Advanced Algorithms", "CS401", 4, 1, "fas fa-chess"),
    ("Blockchain Technology", "CS402", 4, 1, "fas fa-link"),
    ("IoT Systems", "CS403", 4, 1, "fas fa-wifi"),
    ("Project Management", "MG401", 4, 1, "fas fa-tasks"),
    ("Research Methodology", "RM401", 4, 1, "fas fa-microscope"),
    // 4th year, semester 2
    ("Final Year Project", "CS404", 4, 2, "fas fa-graduation-cap"),
    ("Industry Internship", "IN401", 4, 2, "fas fa-briefcase"),
    ("Advanced Topics in AI", "CS405", 4, 2, "fas fa-lightbulb"),
    ("Entrepreneurship", "EN401", 4, 2, "fas fa-rocket"),
];

/// Execute the seed command
pub async fn execute(args: &SeedArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let subject_repo = SubjectRepository::new(pool.clone());

    if !args.force {
        let existing = subject_repo.find_all().await?;
        if !existing.is_empty() {
            println!(
                "Database already has {} subject(s); skipping (use --force to seed anyway)",
                existing.len()
            );
            return Ok(());
        }
    }

    let mut created = 0usize;
    for (name, code, year, semester, icon) in CATALOG {
        let exists = subject_repo
            .find_existing(name, code, *year, *semester, branch::DEFAULT_BRANCH)
            .await?
            .is_some();
        if exists {
            continue;
        }

        subject_repo
            .create(&CreateSubject {
                name: name.to_string(),
                code: code.to_string(),
                year: *year,
                semester: *semester,
                branch: branch::DEFAULT_BRANCH.to_string(),
                icon: icon.to_string(),
            })
            .await?;
        created += 1;
    }

    output::print_success(&format!("Seeded {created} subject(s)"));
    Ok(())
}
