//! dungen: generate, inspect and link dungeon chunks

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use dg_cli::{CliError, ascii, default_catalog, exit_toward, logging};
use dg_core::link::{Direction, chunk_offset, link_chunks};
use dg_core::save::{load_catalog, load_dungeon, load_params, save_dungeon, to_json, to_json_pretty};
use dg_core::{GenerationParams, LinkParams, Seed, generate};

/// Seeded BSP dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log at debug level
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dungeon and write it as JSON
    Generate {
        /// Generation parameters (JSON, camelCase keys)
        #[arg(long)]
        params: Option<PathBuf>,

        /// Room template catalog (JSON); the built-in catalog otherwise
        #[arg(long)]
        rooms: Option<PathBuf>,

        #[arg(long)]
        seed: Option<String>,

        #[arg(long)]
        width: Option<i32>,

        #[arg(long)]
        height: Option<i32>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,

        /// Print an ASCII preview to stderr
        #[arg(long)]
        preview: bool,
    },

    /// Print an ASCII rendering of a saved dungeon
    Show { file: PathBuf },

    /// Carve a path from one saved chunk into the next
    Link {
        current: PathBuf,
        next: PathBuf,

        /// Edge of the current chunk the next one is attached to
        #[arg(short, long)]
        direction: Direction,

        /// Allow digging through walls at this cost per cell
        #[arg(long)]
        wall_cost: Option<u32>,

        /// Where to write the patched chunks; they are overwritten in place otherwise
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Generate {
            params,
            rooms,
            seed,
            width,
            height,
            output,
            pretty,
            preview,
        } => {
            let mut params = match params {
                Some(path) => load_params(path)?,
                None => GenerationParams::default(),
            };
            if let Some(seed) = seed {
                params.seed = Seed::from(seed);
            }
            if let Some(width) = width {
                params.map_width = width;
            }
            if let Some(height) = height {
                params.map_height = height;
            }
            let catalog = match rooms {
                Some(path) => load_catalog(path)?,
                None => default_catalog()?,
            };

            let dungeon = generate(&params, &catalog)?;
            if preview {
                eprint!("{}", ascii::render(&dungeon));
            }
            match output {
                Some(path) => {
                    save_dungeon(&dungeon, &path, pretty)?;
                    log::info!("wrote {}", path.display());
                }
                None if pretty => println!("{}", to_json_pretty(&dungeon)?),
                None => println!("{}", to_json(&dungeon)?),
            }
        }

        Command::Show { file } => {
            let dungeon = load_dungeon(file)?;
            print!("{}", ascii::render(&dungeon));
        }

        Command::Link {
            current,
            next,
            direction,
            wall_cost,
            output_dir,
        } => {
            let mut current_chunk = load_dungeon(&current)?;
            let mut next_chunk = load_dungeon(&next)?;
            let start = exit_toward(&current_chunk, direction).ok_or(CliError::NoExit(direction))?;
            let offset = chunk_offset(&current_chunk, direction);
            let params = LinkParams {
                wall_cost,
                ..LinkParams::default()
            };

            let link = link_chunks(&mut current_chunk, &mut next_chunk, start, offset, &params)?;
            println!(
                "linked {:?} to door {:?}: {} cells, cost {}, {} tiles changed",
                start,
                link.door,
                link.path.len(),
                link.cost,
                link.patches.len()
            );

            let current_out = destination(&current, output_dir.as_deref());
            let next_out = destination(&next, output_dir.as_deref());
            save_dungeon(&current_chunk, &current_out, false)?;
            save_dungeon(&next_chunk, &next_out, false)?;
            log::info!("wrote {} and {}", current_out.display(), next_out.display());
        }
    }
    Ok(())
}

fn destination(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match (output_dir, input.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => input.to_path_buf(),
    }
}
