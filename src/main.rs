use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use protalign::{AlignMode, AlignOptions, Aligner, Sequence, SubstitutionTable};

#[derive(Parser, Debug)]
#[command(name = "protalign")]
#[command(about = "Pairwise protein alignment with affine gaps", long_about = None)]
struct Cli {
    /// Two-line file: row sequence, then column sequence
    input: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Mode::Global)]
    mode: Mode,
    /// Lower-triangular score table (default: BLOSUM62)
    #[arg(long)]
    matrix: Option<PathBuf>,
    #[arg(long, default_value_t = -8, allow_hyphen_values = true)]
    gap_open: i32,
    /// Defaults to the gap open penalty
    #[arg(long, allow_hyphen_values = true)]
    gap_extend: Option<i32>,
    /// Alignments to print per round (default: every tied alignment)
    #[arg(short = 'n', long)]
    results: Option<usize>,
    /// Suboptimal rounds after the optimal one (local mode only)
    #[arg(short, long, default_value_t = 0)]
    suboptimal: usize,
    /// Also write the alignments to this file
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Global,
    SemiGlobal,
    Local,
}

impl From<Mode> for AlignMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Global => AlignMode::Global,
            Mode::SemiGlobal => AlignMode::SemiGlobal,
            Mode::Local => AlignMode::Local,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (row, col) = read_sequences(&cli.input)?;
    let table = match &cli.matrix {
        Some(path) => read_table(path)?,
        None => SubstitutionTable::blosum62(),
    };

    let mut options = AlignOptions::default()
        .with_gap_open(cli.gap_open)
        .with_suboptimal_depth(cli.suboptimal);
    options.gap_extend = cli.gap_extend;
    options.result_count = cli.results;
    let aligner = Aligner::with(&table).with_options(options);

    let mut writer = cli
        .out
        .as_ref()
        .map(|path| {
            File::create(path)
                .map(BufWriter::new)
                .with_context(|| format!("could not create output file {}", path.display()))
        })
        .transpose()?;

    let start = Instant::now();
    let mut count = 0;
    for aln in aligner.align(&row, &col, cli.mode.into())? {
        println!("{aln}\n");
        if let Some(writer) = writer.as_mut() {
            writeln!(writer, "{}\n{}", aln.row(), aln.col())
                .context("could not write to output file")?;
        }
        count += 1;
    }
    if let Some(mut writer) = writer {
        writer.flush().context("could not write to output file")?;
    }
    info!(
        "{count} alignment(s) of {}x{} residues in {:.6}s",
        row.len(),
        col.len(),
        start.elapsed().as_secs_f64()
    );
    if count == 0 {
        println!("No alignment found.");
    }
    Ok(())
}

/// First line is the row sequence, second line the column sequence.
fn read_sequences(path: &Path) -> Result<(Sequence, Sequence)> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();
    let mut next = |which: &str| -> Result<Sequence> {
        let line = match lines.next() {
            Some(line) => line.with_context(|| format!("could not read {which} sequence"))?,
            None => bail!("{} has no {which} sequence line", path.display()),
        };
        let seq: Sequence = line
            .trim()
            .parse()
            .with_context(|| format!("bad {which} sequence"))?;
        Ok(seq.with_description(which))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}

fn read_table(path: &Path) -> Result<SubstitutionTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read score table {}", path.display()))?;
    let table: SubstitutionTable = text
        .parse()
        .with_context(|| format!("bad score table {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(table.with_description(name))
}
