use clap::{arg, crate_version, Command};
use dna_ring_codec::{Codec, Metadata, Options};
use serde::{Deserialize, Serialize};

const RCH: &str = "unreachable was reached";

/// On-disk envelope pairing the framed code stream with its metadata, the
/// concrete (non-normative) choice this crate makes for "callers choose how
/// to serialize `(codes, metadata)` on disk" (SPEC_FULL §6).
#[derive(Serialize, Deserialize)]
struct Sidecar {
    metadata: Metadata,
    codes: Vec<u32>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Trace } else { log::LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).init();
}

fn options_from(chunk_size: usize, lenient: bool) -> Options {
    Options { chunk_size, strict: !lenient, ..Options::default() }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let long_help = "Examples:
---------
Compress: `dna-ring-codec compress -i input.bin -o output.json`
Expand:   `dna-ring-codec expand -i output.json -o recovered.bin`
Stats:    `dna-ring-codec stats -i input.bin`";

    let mut main_cmd = Command::new("dna-ring-codec")
        .about("Compress and expand bytes through the circular DNA ring codec")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("compress")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path (JSON sidecar)").required(true))
            .arg(arg!(--"chunk-size" <N> "codes between framing markers").required(false))
            .arg(arg!(--lenient "best-effort recovery instead of typed errors").required(false))
            .arg(arg!(-v --verbose "trace-level logging").required(false))
            .about("compress a file"),
    );

    main_cmd = main_cmd.subcommand(
        Command::new("expand")
            .arg(arg!(-i --input <PATH> "input path (JSON sidecar)").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .arg(arg!(--lenient "best-effort recovery instead of typed errors").required(false))
            .arg(arg!(-v --verbose "trace-level logging").required(false))
            .about("expand a file"),
    );

    main_cmd = main_cmd.subcommand(
        Command::new("stats")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(--"chunk-size" <N> "codes between framing markers").required(false))
            .about("print compression diagnostics for a file, without writing output"),
    );

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let chunk_size: usize = cmd
            .get_one::<String>("chunk-size")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(1000);
        let lenient = cmd.get_flag("lenient");
        init_logging(cmd.get_flag("verbose"));

        let dat = std::fs::read(path_in)?;
        let codec = Codec::new(options_from(chunk_size, lenient))?;
        let (codes, metadata) = codec.compress(&dat);
        log::info!(
            "compressed {} bytes into {} framed codes (ring {}, marker {})",
            dat.len(),
            codes.len(),
            metadata.ring_len,
            metadata.marker
        );
        let sidecar = Sidecar { metadata, codes };
        std::fs::write(path_out, serde_json::to_vec(&sidecar)?)?;
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let lenient = cmd.get_flag("lenient");
        init_logging(cmd.get_flag("verbose"));

        let raw = std::fs::read(path_in)?;
        let sidecar: Sidecar = serde_json::from_slice(&raw)?;
        let codec = Codec::new(options_from(sidecar.metadata.chunk_size, lenient))?;
        let decompressed = codec.decompress(&sidecar.codes, &sidecar.metadata)?;
        if let Some(at) = decompressed.truncated_at {
            log::warn!("decompression truncated at code position {at}");
        }
        std::fs::write(path_out, decompressed.bytes)?;
    }

    if let Some(cmd) = matches.subcommand_matches("stats") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let chunk_size: usize = cmd
            .get_one::<String>("chunk-size")
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or(1000);

        let dat = std::fs::read(path_in)?;
        let codec = Codec::new(options_from(chunk_size, false))?;
        let (codes, metadata) = codec.compress(&dat);
        let report = dna_ring_codec::stats::stats(&dat, &codes, &metadata);
        println!("original bytes:        {}", report.original_bytes);
        println!("framed bytes:           {}", report.framed_bytes);
        println!("compression ratio:      {:.4}", report.compression_ratio);
        println!("bits per base:          {:.2}", report.bits_per_base);
        println!("input entropy:          {:.4} bits/byte", report.input_entropy);
        println!("code stream entropy:    {:.4} bits/byte", report.code_stream_entropy);
        println!("theoretical min bytes:  {:.1}", report.theoretical_min_bytes);
        println!("shannon efficiency:     {:.4}", report.shannon_efficiency);
    }

    Ok(())
}
