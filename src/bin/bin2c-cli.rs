//! bin2c-cli - Command-line interface for stbcomp
//!
//! A command-line tool for embedding binary files in C/C++ sources, for
//! producing raw stb_compress streams and for generating icon font defines.

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use stbcomp::{
    codepoint_defines, compress_bytes, parse_codepoint_pairs, symbol_from_path, write_source,
    EmbedOptions, SourceEncoding, StreamHeader, HEADER_SIZE, TRAILER_SIZE,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Inputs above this size get a progress spinner
const PROGRESS_THRESHOLD: usize = 1024 * 1024;

#[derive(Parser)]
#[command(name = "bin2c-cli")]
#[command(about = "A CLI tool for embedding stb-compressed binaries in C/C++ sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C/C++ source embedding a file
    Embed {
        /// Binary file to embed
        input: PathBuf,

        /// Symbol name (defaults to the input file name without extension)
        symbol: Option<String>,

        /// Array encoding
        #[arg(short, long, value_enum, default_value_t = CliEncoding::U8)]
        encoding: CliEncoding,

        /// Embed the file as-is instead of compressing it
        #[arg(long)]
        no_compress: bool,

        /// Do not mark the generated symbols as 'static'
        #[arg(long)]
        no_static: bool,

        /// Output source file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Compress a file into a raw stb_compress stream
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },

    /// Generate #defines for icon font code points
    Defines {
        /// Code points as NAME=hex pairs (e.g. SIGN_OUT=f2f5)
        pairs: Vec<String>,

        /// Prefix prepended to every define name
        #[arg(short, long, default_value = "FONT_")]
        prefix: String,

        /// Read additional NAME=hex pairs from a file
        #[arg(short = 'i', long)]
        from_file: Option<PathBuf>,

        /// Output header file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliEncoding {
    /// unsigned char array (~12 bytes of source per 4 bytes of data)
    U8,
    /// unsigned int array (~11 bytes of source per 4 bytes of data, little-endian)
    U32,
    /// Base85 string (~5 bytes of source per 4 bytes of data, needs a decoder)
    Base85,
}

impl From<CliEncoding> for SourceEncoding {
    fn from(encoding: CliEncoding) -> Self {
        match encoding {
            CliEncoding::U8 => SourceEncoding::U8,
            CliEncoding::U32 => SourceEncoding::U32,
            CliEncoding::Base85 => SourceEncoding::Base85,
        }
    }
}

struct EmbedArgs {
    input: PathBuf,
    symbol: Option<String>,
    options: EmbedOptions,
    output: Option<PathBuf>,
    force: bool,
}

fn main() {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Embed {
            input,
            symbol,
            encoding,
            no_compress,
            no_static,
            output,
            force,
        } => embed_file(
            EmbedArgs {
                input,
                symbol,
                options: EmbedOptions {
                    encoding: encoding.into(),
                    compress: !no_compress,
                    static_symbol: !no_static,
                },
                output,
                force,
            },
            cli.verbose,
            cli.quiet,
        ),
        Commands::Compress {
            input,
            output,
            force,
        } => compress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
        Commands::Defines {
            pairs,
            prefix,
            from_file,
            output,
            force,
        } => generate_defines(
            &pairs,
            &prefix,
            from_file.as_deref(),
            output.as_deref(),
            force,
            cli.quiet,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(input: &Path, output: Option<&Path>, force: bool) -> Result<(), String> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()));
    }

    if let Some(output) = output {
        if output.exists() && !force {
            return Err(format!(
                "Output file '{}' already exists. Use --force to overwrite",
                output.display()
            ));
        }
    }

    Ok(())
}

fn progress_spinner(input_size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || input_size <= PROGRESS_THRESHOLD {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn embed_file(args: EmbedArgs, verbose: bool, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(&args.input, args.output.as_deref(), args.force)?;

    let input_name = args.input.to_string_lossy().into_owned();
    let symbol = args
        .symbol
        .unwrap_or_else(|| symbol_from_path(&input_name));

    let data = fs::read(&args.input)?;
    log::debug!("read {} bytes from '{}'", data.len(), input_name);

    let progress = progress_spinner(data.len(), quiet || args.output.is_none(), "Compressing...");

    let compressed;
    let payload = if args.options.compress {
        compressed = compress_bytes(&data).map_err(|e| format!("Compression failed: {}", e))?;
        &compressed[..]
    } else {
        &data[..]
    };

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match &args.output {
        Some(path) => {
            let mut file = io::BufWriter::new(fs::File::create(path)?);
            write_source(&mut file, payload, data.len(), &input_name, &symbol, &args.options)?;
            file.flush()?;

            if verbose && !quiet {
                println!(
                    "Embedded '{}' as '{}' into '{}' ({} -> {} bytes)",
                    input_name,
                    symbol,
                    path.display(),
                    data.len(),
                    payload.len()
                );
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_source(&mut out, payload, data.len(), &input_name, &symbol, &args.options)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn compress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, Some(output), force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    // Read input file
    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_spinner(input_size, quiet, "Compressing...");

    let compressed_data =
        compress_bytes(&input_data).map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(pb) = progress {
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();
    let compression_ratio = if input_size > 0 {
        (output_size as f64 / input_size as f64) * 100.0
    } else {
        0.0
    };

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", compression_time);

        if compression_ratio > 100.0 {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, None, false)?;

    let data = fs::read(input)?;
    let header = StreamHeader::parse(&data)?;

    println!("stb_compress Stream Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Original Size: {} bytes", header.original_len);
    println!("  Window: {} bytes ({:#x})", header.window, header.window);

    if header.original_len > 0 {
        let ratio = (data.len() as f64 / header.original_len as f64) * 100.0;
        println!("  Compression Ratio: {:.1}%", ratio);
    }

    if verbose {
        println!(
            "  Header bytes: {}",
            data[..HEADER_SIZE]
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        );
        println!(
            "  Opcode bytes: {}",
            data.len().saturating_sub(HEADER_SIZE + TRAILER_SIZE)
        );
    }

    match StreamHeader::trailer(&data) {
        Some(checksum) => {
            println!("  Adler-32: {:08X}", checksum);
            println!("  Status: ✓ Stream trailer present");
        }
        None => {
            println!("  Status: ✗ Missing or truncated stream trailer");
        }
    }

    Ok(())
}

fn generate_defines(
    pairs: &[String],
    prefix: &str,
    from_file: Option<&Path>,
    output: Option<&Path>,
    force: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut raw = pairs.join(" ");
    if let Some(path) = from_file {
        check_paths(path, output, force)?;
        raw.push(' ');
        raw.push_str(&fs::read_to_string(path)?);
    } else if let Some(path) = output {
        if path.exists() && !force {
            return Err(format!(
                "Output file '{}' already exists. Use --force to overwrite",
                path.display()
            )
            .into());
        }
    }

    let entries = parse_codepoint_pairs(&raw);
    if entries.is_empty() {
        return Err("No NAME=hex pairs given".into());
    }
    log::debug!("generating {} defines with prefix '{}'", entries.len(), prefix);

    let text = codepoint_defines(prefix.trim(), &entries);
    match output {
        Some(path) => {
            fs::write(path, &text)?;
            if !quiet {
                println!("Wrote {} defines to '{}'", entries.len(), path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}
