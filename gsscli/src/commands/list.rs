/// Listing problem files.
use super::*;

impl List {
    pub fn run(self) {
        let List { path } = self;

        let all_problems = match fs::list_problems(&path) {
            Ok(x) => x,
            Err(err) => fatal_error!(1, "Cannot list problems: {}", err),
        };

        let mut dirs: Vec<&String> = all_problems.keys().collect();
        dirs.sort();

        for dir in dirs {
            let mut entries: Vec<&fs::ProblemEntry> = all_problems[dir].iter().collect();
            if entries.is_empty() {
                continue;
            }
            entries.sort_by(|a, b| a.filename.cmp(&b.filename));

            let header = if dir.is_empty() { "." } else { dir.as_str() };
            println!("{}", header.bold());
            for entry in entries {
                println!(
                    "  {:32}{:20}{}",
                    entry.filename.trim_start_matches('/'),
                    entry.kind,
                    entry.name
                );
            }
        }
    }
}
