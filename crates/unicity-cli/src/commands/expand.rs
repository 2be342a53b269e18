use nu_ansi_term::Color;
use unicity::{SearchPath, matches};

use crate::util::read_json;

#[derive(clap::Args)]
pub struct Args {
    /// Path to JSON document (use - for stdin)
    pub file: String,

    /// Dotted search path, `[]` selects every array element
    pub path: String,

    /// Print only the values, one per line
    #[arg(long)]
    pub values_only: bool,
}

pub fn run(args: Args) {
    let document = match read_json(&args.file) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", Color::Red.paint(e));
            std::process::exit(1);
        }
    };

    let path = SearchPath::parse(&args.path);
    let mut count = 0usize;
    for (position, value) in matches(&path, &document) {
        count += 1;
        if args.values_only {
            println!("{value}");
        } else {
            println!("{}\t{value}", Color::Cyan.paint(position.to_string()));
        }
    }

    if count == 0 {
        eprintln!(
            "{} no values at '{path}'",
            Color::Yellow.paint("warning:")
        );
    }
}
