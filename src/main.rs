use anyhow::Result;
use clap::{Parser, Subcommand};

mod index;
mod io;
mod query;
mod util;

#[derive(Parser, Debug)]
#[command(name = "pheap-rust", author, version, about = "Position-heap full-text substring index", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the index for a text file and search patterns in it
    Search {
        /// Text file to index
        text: String,
        /// Patterns given directly on the command line
        patterns: Vec<String>,
        /// File with one pattern per line (in addition to the arguments)
        #[arg(short = 'p', long = "patterns")]
        patterns_file: Option<String>,
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
        /// Report the internal reversed positions instead of left-to-right starts
        #[arg(long)]
        raw: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Print an indented preorder dump of the index tree (debugging aid)
    Dump {
        /// Text file to index
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Search { text, patterns, patterns_file, out, raw, threads } => {
            let opt = query::SearchOpt { threads, raw_positions: raw };
            run_search(&text, &patterns, patterns_file.as_deref(), out.as_deref(), opt)
        }
        Commands::Dump { text } => run_dump(&text),
    }
}

fn run_search(
    text_path: &str,
    pattern_args: &[String],
    patterns_path: Option<&str>,
    out_path: Option<&str>,
    opt: query::SearchOpt,
) -> Result<()> {
    let text = io::text::read_text_file(text_path)?;

    let mut patterns: Vec<Vec<u8>> =
        pattern_args.iter().map(|p| p.as_bytes().to_vec()).collect();
    if let Some(path) = patterns_path {
        let fh = std::fs::File::open(path)
            .map_err(|e| anyhow::anyhow!("cannot open patterns file '{}': {}", path, e))?;
        let mut reader = io::patterns::PatternReader::new(std::io::BufReader::new(fh));
        while let Some(pat) = reader.next_pattern()? {
            patterns.push(pat);
        }
    }
    if patterns.is_empty() {
        anyhow::bail!("no patterns given (pass them as arguments or via --patterns)");
    }

    println!("text: {}", text_path);
    println!("text_len: {}", text.len());
    println!("patterns: {}", patterns.len());

    let heap = index::PositionHeap::build(&text);

    let mut out_box: Box<dyn std::io::Write> = if let Some(p) = out_path {
        Box::new(std::io::BufWriter::new(std::fs::File::create(p).map_err(
            |e| anyhow::anyhow!("cannot create output file '{}': {}", p, e),
        )?))
    } else {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    };

    query::search_patterns(&heap, &patterns, &mut out_box, opt)
}

fn run_dump(text_path: &str) -> Result<()> {
    let text = io::text::read_text_file(text_path)?;
    let heap = index::PositionHeap::build(&text);
    print!("{}", heap.preorder_dump());
    Ok(())
}
