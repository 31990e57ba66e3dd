use chime::Schedule;
use clap::Parser;
use jiff::tz::TimeZone;
use jiff::Zoned;
use std::process;

#[derive(Parser)]
#[command(
    name = "chime",
    about = "Recurring reminder alarms within a daily time window",
    version
)]
struct Cli {
    /// Window open, 24-hour HH:mm (e.g. "05:00")
    start: String,

    /// Window close, 24-hour HH:mm; a close not after the open crosses midnight
    end: String,

    /// Minutes between reminders within the window
    interval: i64,

    /// Number of triggers to show
    #[arg(short, long, default_value = "1")]
    n: u32,

    /// Start instant for the query (ISO 8601 datetime). Shows up to 100 triggers unless --to is specified.
    #[arg(long, conflicts_with = "n")]
    from: Option<String>,

    /// End of range for --from query (ISO 8601 datetime). When specified, shows all triggers in (from, to].
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// IANA timezone for wall-clock resolution (defaults to the system zone)
    #[arg(long)]
    zone: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the schedule without computing
    #[arg(long)]
    check: bool,

    /// Show the parsed schedule as JSON
    #[arg(long)]
    parse: bool,
}

fn main() {
    let cli = Cli::parse();

    let schedule = match Schedule::from_strings(&cli.start, &cli.end, cli.interval) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.parse {
        match serde_json::to_string_pretty(&schedule) {
            Ok(json) => {
                println!("{json}");
                process::exit(0);
            }
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    }

    let tz = match cli.zone {
        Some(ref name) => match TimeZone::get(name) {
            Ok(tz) => tz,
            Err(e) => {
                eprintln!("error: invalid timezone '{name}': {e}");
                process::exit(1);
            }
        },
        None => TimeZone::system(),
    };

    // Handle --from/--to range query
    if let Some(ref from_str) = cli.from {
        let from: Zoned = match from_str.parse() {
            Ok(z) => z,
            Err(e) => {
                eprintln!("error: invalid --from datetime: {e}");
                process::exit(1);
            }
        };
        let from = from.with_time_zone(tz.clone());

        let results: Vec<Zoned> = if let Some(ref to_str) = cli.to {
            let to: Zoned = match to_str.parse() {
                Ok(z) => z,
                Err(e) => {
                    eprintln!("error: invalid --to datetime: {e}");
                    process::exit(1);
                }
            };
            schedule.between(&from, &to).collect()
        } else {
            schedule.occurrences(&from).take(100).collect()
        };

        if results.is_empty() {
            eprintln!("no triggers in range");
            process::exit(0);
        }

        print_results(&results, cli.json);
        process::exit(0);
    }

    // Default: compute next N triggers from now
    let mut n = cli.n;
    if n > 1000 {
        eprintln!("warning: capped at 1000 triggers");
        n = 1000;
    }

    let now = Zoned::now().with_time_zone(tz);
    let results = schedule.next_n_from(&now, n as usize);

    if results.is_empty() {
        eprintln!("no upcoming triggers");
        process::exit(0);
    }

    print_results(&results, cli.json);
}

fn print_results(results: &[Zoned], json: bool) {
    if json {
        let iso_strings: Vec<String> = results.iter().map(|z| z.to_string()).collect();
        println!("{}", serde_json::to_string(&iso_strings).unwrap());
    } else {
        for z in results {
            println!("{z}");
        }
    }
}
