use clap::{Parser, Subcommand};
use anyhow::Result;
use std::path::Path;
use edgebreaker::prelude::*;

#[derive(Parser)]
#[command(name = "rfcp")]
#[command(about = "A CLI tool for EdgeBreaker mesh compression")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress an OBJ file
    Compress {
        /// Input file path
        #[arg(short, long)]
        input: String,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Password for scrambling the output
        #[arg(short, long)]
        password: Option<String>,

        /// Bits per quantized coordinate
        #[arg(short = 'k', long, default_value_t = 10)]
        quantization_bits: u8,
    },
    /// Decompress a compressed file into an OBJ file
    Extract {
        /// Input file path
        #[arg(short, long)]
        input: String,

        /// Output file path
        #[arg(short, long)]
        output: String,

        /// Password the file was compressed with
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Print the CLERS histogram and the compressed size of an OBJ file
    Stats {
        /// Input file path
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compress { input, output, password, quantization_bits } => {
            compress_obj(&input, &output, password, quantization_bits)
        },
        Command::Extract { input, output, password } => extract_obj(&input, &output, password),
        Command::Stats { input } => print_stats(&input),
    }
}

fn check_extension(path: &str, expected: &str) -> Result<()> {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    if ext != expected {
        anyhow::bail!("'{}' must be a .{} file", path, expected);
    }
    Ok(())
}

fn load(input_path: &str) -> Result<Mesh> {
    check_extension(input_path, "obj")?;
    let mesh = load_obj(input_path)
        .map_err(|e| anyhow::anyhow!("Failed to load OBJ file: {}", e))?;
    Ok(preprocess(mesh))
}

fn compress_obj(input_path: &str, output_path: &str, password: Option<String>, quantization_bits: u8) -> Result<()> {
    check_extension(output_path, "rfcp")?;
    let mesh = load(input_path)?;

    let config = encode::Config {
        quantization_bits,
        password,
        ..encode::Config::default()
    };
    let buffer = encode(&mesh, &config)
        .map_err(|e| anyhow::anyhow!("Failed to encode mesh: {}", e))?;

    std::fs::write(output_path, buffer.to_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write output file: {}", e))?;

    println!(
        "{} vertices, {} triangles -> {} bytes",
        mesh.num_vertices(),
        mesh.num_faces(),
        buffer.to_bytes().len()
    );
    Ok(())
}

fn extract_obj(input_path: &str, output_path: &str, password: Option<String>) -> Result<()> {
    check_extension(input_path, "rfcp")?;
    check_extension(output_path, "obj")?;

    let bytes = std::fs::read(input_path)
        .map_err(|e| anyhow::anyhow!("Failed to read input file: {}", e))?;
    let mesh = decode(&Buffer::from_bytes(bytes), &decode::Config { password })
        .map_err(|e| anyhow::anyhow!("Failed to decode mesh: {}", e))?;

    write_obj(output_path, &mesh)
        .map_err(|e| anyhow::anyhow!("Failed to write OBJ file: {}", e))?;
    Ok(())
}

fn print_stats(input_path: &str) -> Result<()> {
    let mesh = load(input_path)?;

    let connectivity = encode::connectivity::edgebreaker::Config::default();
    let compressed = compress(&mesh, &connectivity)
        .map_err(|e| anyhow::anyhow!("Failed to compress mesh: {}", e))?;
    let buffer = encode(&mesh, &encode::Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to encode mesh: {}", e))?;

    let stats = MeshStats::of(&mesh);
    println!("vertices:  {}", stats.num_vertices);
    println!("triangles: {}", stats.num_triangles);
    println!("euler characteristic: {}", stats.euler_characteristic);
    for symbol in [Symbol::C, Symbol::L, Symbol::E, Symbol::R, Symbol::S] {
        let count = compressed.clers.count(symbol);
        let share = 100.0 * count as f64 / compressed.clers.len().max(1) as f64;
        println!("{}: {:>8} ({:5.1}%)", symbol.as_char(), count, share);
    }
    println!(
        "compressed size: {} bytes ({:.2} bits per triangle)",
        buffer.to_bytes().len(),
        buffer.len() as f64 / stats.num_triangles.max(1) as f64
    );
    Ok(())
}
