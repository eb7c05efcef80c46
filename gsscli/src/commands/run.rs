/// Commands related to solving grid problems.
use super::*;

fn read_problem<P: AsRef<Path>>(path: P) -> GridProblem {
    match GridProblem::read_from_file(path) {
        Ok(x) => x,
        Err(err) => fatal_error!(1, "Cannot read problem: {}", err),
    }
}

fn print_cost(label: &str, cost: Option<Cost>) {
    match cost {
        Some(cost) => println!("{:18}{}", label.bold(), cost),
        None => println!("{:18}{}", label.bold(), "unreachable"),
    }
}

fn print_report(report: &SolveReport) {
    println!("{:18}{}", "Total time:".bold(), report.total_time);
    println!("{:18}{}", "Max memory usage:".bold(), report.max_memory);
    match &report.result {
        QueryOutcome::ShortestPath { cost } => print_cost("Lowest cost:", *cost),
        QueryOutcome::BestSeats { best_cost, seats } => {
            print_cost("Lowest cost:", *best_cost);
            println!("{:18}{}", "Optimal tiles:".bold(), seats);
        }
        QueryOutcome::CheatCount { cheats } => {
            println!("{:18}{}", "Cheats:".bold(), cheats);
        }
        QueryOutcome::TrailScores { total } => {
            println!("{:18}{}", "Total score:".bold(), total);
        }
        QueryOutcome::TrailRatings { total } => {
            println!("{:18}{}", "Total rating:".bold(), total);
        }
        QueryOutcome::PatrolCoverage { outcome } => match outcome {
            PatrolOutcome::Exited { visited } => {
                println!("{:18}{}", "Outcome:".bold(), "exited");
                println!("{:18}{}", "Visited tiles:".bold(), visited);
            }
            PatrolOutcome::Looped => {
                println!("{:18}{}", "Outcome:".bold(), "looped");
            }
        },
        QueryOutcome::PatrolObstructions { loops } => {
            println!("{:18}{}", "Loop placements:".bold(), loops);
        }
    }
}

fn save_report(report: &SolveReport, problem_path: &Path) {
    let name = match &report.name {
        Some(name) => name.clone(),
        None => problem_path
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .to_string(),
    };
    let mut report_path = problem_path.to_path_buf();
    report_path.pop();
    report_path.push(fs::report_filename(&name));
    if let Err(e) = fs::save_report(report, &report_path) {
        log::error!("Failed to save report: {}", e);
    }
}

impl Run {
    pub fn run(self) {
        let Run { paths, save, json } = self;
        let mut failed = false;

        for path in &paths {
            let problem = read_problem(path);

            println!(
                "{:18}{}",
                "Problem Name:".bold(),
                problem.name.as_deref().unwrap_or("-")
            );
            println!("{:18}{}", "Query:".bold(), problem.query.kind());

            let report = match problem.solve() {
                Ok(report) => report,
                Err(failure) => {
                    println!("{}", "Solve failed!".red().bold());
                    println!("{}", failure);
                    println!();
                    failed = true;
                    continue;
                }
            };

            print_report(&report);

            if save {
                save_report(&report, path);
            }

            if json {
                let serialized = match serde_json::to_string_pretty(&report) {
                    Ok(s) => s,
                    Err(e) => fatal_error!(1, "Error while serializing report: {}", e),
                };
                println!("{}", serialized);
            }

            println!();
        }

        if failed {
            std::process::exit(1);
        }
    }
}
