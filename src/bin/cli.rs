use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use task_planner::{
    ExportFormat, Goal, PlanRequest, Planner, PlannerConfig, Task, TaskStatus, export, logging,
    views,
};

#[derive(Parser, Debug)]
#[command(
    name = "planner",
    author,
    version,
    about = "Break a goal into a scheduled task plan",
    long_about = None
)]
struct Cli {
    /// The goal to plan, e.g. "Launch a mobile app"
    #[arg(required = true, num_args = 1..)]
    goal: Vec<String>,

    /// Time budget in days
    #[arg(long, conflicts_with = "due")]
    days: Option<f64>,

    /// Due date; the budget becomes the days between start and due
    #[arg(long, value_name = "YYYY-MM-DD")]
    due: Option<NaiveDate>,

    /// Plan day 0 (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    start: Option<NaiveDate>,

    /// Skip the remote producer and use the built-in templates
    #[arg(long)]
    offline: bool,

    /// What to print after generating
    #[arg(long, value_enum, default_value_t = View::Timeline)]
    view: View,

    /// Export the plan (json, csv, md, ics)
    #[arg(long, value_name = "FORMAT")]
    export: Option<ExportFormat>,

    /// Export destination; defaults to <title>.<ext> in the current directory
    #[arg(long, value_name = "PATH", requires = "export")]
    out: Option<PathBuf>,

    /// Enter the interactive prompt after generating
    #[arg(short, long)]
    interactive: bool,

    /// Debug logging (PLANNER_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to PLANNER_CONFIG or ./planner.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Timeline,
    Daily,
    Graph,
    Stats,
    Table,
    Json,
}

fn render_view(goal: &Goal, view: View) -> String {
    let rendered = match view {
        View::Timeline => Ok(views::render_timeline(goal)),
        View::Daily => Ok(views::render_days(goal)),
        View::Graph => Ok(views::render_dependencies(goal)),
        View::Stats => Ok(views::render_stats(goal)),
        View::Table => views::render_table(goal).map_err(|e| e.to_string()),
        View::Json => export::render(goal, ExportFormat::Json).map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| format!("Error rendering view: {e}"))
}

const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show this help"),
    ("show", "Timeline view"),
    ("table", "Task table"),
    ("daily", "Day-by-day view"),
    ("graph", "Dependency phases and critical path"),
    ("stats", "Project overview"),
    ("critical", "List critical tasks"),
    ("status <n> <status>", "Set status of task #n (pending|in_progress|completed)"),
    ("next <n>", "Advance task #n to its next status"),
    ("export <json|csv|md|ics> <path>", "Write the plan to a file"),
    ("quit|exit", "Exit"),
];

fn print_help() {
    println!("Commands:");
    for (command, description) in COMMANDS {
        println!("  {command:<34} {description}");
    }
}

fn print_critical(goal: &Goal) {
    println!(
        "Critical path: {} task(s), {:.2} days",
        goal.critical_path.len(),
        goal.critical_path.length
    );
    for task in goal.tasks.iter().filter(|t| goal.is_critical(t.id)) {
        println!(
            "  #{:<3} {} (day {:.2} - {:.2})",
            task.order_index + 1,
            task.title,
            task.start_day,
            task.end_day
        );
    }
}

fn write_export(goal: &Goal, format: ExportFormat, path: &Path) -> bool {
    match task_planner::save_export(goal, format, path) {
        Ok(()) => {
            println!("Exported {} to {}", format, path.display());
            true
        }
        Err(e) => {
            eprintln!("Error exporting plan to {}: {}", path.display(), e);
            false
        }
    }
}

fn task_number(arg: Option<&str>, goal: &Goal) -> Result<Task, String> {
    let number: usize = arg
        .ok_or_else(|| "missing task number".to_string())?
        .parse()
        .map_err(|_| "invalid task number".to_string())?;
    goal.task_by_number(number)
        .cloned()
        .ok_or_else(|| format!("Task #{number} not found"))
}

fn apply_status(goal: &mut Goal, task: &Task, status: TaskStatus) {
    match goal.with_task_status(task.id, status) {
        Ok(updated) => {
            *goal = updated;
            println!("Task #{} '{}' is now {}.", task.order_index + 1, task.title, status);
        }
        Err(e) => println!("Error updating task: {}", e),
    }
}

fn run_repl(mut goal: Goal) {
    println!("Interactive mode - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_view(&goal, View::Timeline)),
            "table" => println!("{}", render_view(&goal, View::Table)),
            "daily" => println!("{}", render_view(&goal, View::Daily)),
            "graph" => println!("{}", render_view(&goal, View::Graph)),
            "stats" => println!("{}", render_view(&goal, View::Stats)),
            "critical" => print_critical(&goal),
            "status" => {
                let task = match task_number(parts.next(), &goal) {
                    Ok(task) => task,
                    Err(e) => {
                        println!("{e}. Usage: status <n> <pending|in_progress|completed>");
                        continue;
                    }
                };
                match parts.next().map(str::parse::<TaskStatus>) {
                    Some(Ok(status)) => apply_status(&mut goal, &task, status),
                    Some(Err(e)) => println!("Invalid status: {e}"),
                    None => println!("Usage: status <n> <pending|in_progress|completed>"),
                }
            }
            "next" => match task_number(parts.next(), &goal) {
                Ok(task) => apply_status(&mut goal, &task, task.status.next()),
                Err(e) => println!("{e}. Usage: next <n>"),
            },
            "export" => match (parts.next(), parts.next()) {
                (Some(fmt), Some(path)) => match fmt.parse::<ExportFormat>() {
                    Ok(format) => {
                        write_export(&goal, format, Path::new(path));
                    }
                    Err(e) => println!("Invalid format: {e}"),
                },
                _ => println!("Usage: export <json|csv|md|ics> <path>"),
            },
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    let config = match PlannerConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let planner = if cli.offline {
        Planner::offline(config.planning.default_total_days)
    } else {
        Planner::new(&config)
    };

    let request = PlanRequest {
        goal: cli.goal.join(" "),
        total_days: cli.days,
        due_date: cli.due,
        start_date: cli.start,
    };
    if request.goal.trim().is_empty() {
        eprintln!("goal must not be empty");
        return ExitCode::from(2);
    }

    let goal = match planner.generate(&request).await {
        Ok(goal) => goal,
        Err(e) => {
            eprintln!("could not generate a plan: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Plan: {} | {} tasks | {} days from {} | {}\n",
        goal.title,
        goal.tasks.len(),
        goal.total_days,
        goal.start_date,
        goal.schedule.to_cli_summary()
    );
    println!("{}", render_view(&goal, cli.view));

    if let Some(format) = cli.export {
        let path = cli
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format.file_name(&goal.title)));
        if !write_export(&goal, format, &path) {
            return ExitCode::FAILURE;
        }
    }

    if cli.interactive {
        run_repl(goal);
    }
    ExitCode::SUCCESS
}
