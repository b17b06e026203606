//! raid6ec - command-line front end for the erasure-coded block store.
//!
//! ```text
//! encode <file> --root <dir>      pad, encode, write chunks + meta.json
//! read <out> --root <dir>         read chunks, unpad, write out
//! erase <disk>... --root <dir>    simulate disk loss
//! scrub --root <dir>              run the locator over every stripe
//! repair <disk>... --root <dir>   reconstruct and rewrite named disks
//! edit --root <dir>               decode, invoke $EDITOR, re-encode
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use raid6ec::config::{CodecParams, Meta, DEFAULT_CHUNK_SIZE, DEFAULT_M, DEFAULT_N};
use raid6ec::error::{Error, Result};
use raid6ec::field::{DEFAULT_MODULUS, FIELD_WIDTH};
use raid6ec::locator::{locate_stripe, StripeHealth};
use raid6ec::store::{FsStore, Store};
use raid6ec::striper::{pad, stripe_count, unpad};
use raid6ec::Codec;

#[derive(Parser, Debug)]
#[command(name = "raid6ec", author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Data disk count
    #[arg(long, global = true, default_value_t = DEFAULT_N)]
    n: usize,

    /// Parity disk count
    #[arg(long, global = true, default_value_t = DEFAULT_M)]
    m: usize,

    /// Field width in bits
    #[arg(long, global = true, default_value_t = FIELD_WIDTH)]
    w: u32,

    /// Field modulus polynomial
    #[arg(long, global = true, default_value_t = DEFAULT_MODULUS)]
    modulus: u32,

    /// Chunk size in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true, env = "LOG_JSON")]
    log_json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a file into the disk array
    Encode {
        file: PathBuf,
        #[arg(long)]
        root: PathBuf,
    },
    /// Decode the disk array back into a file
    Read {
        out: PathBuf,
        #[arg(long)]
        root: PathBuf,
    },
    /// Simulate total loss of one or more disks
    Erase {
        disks: Vec<usize>,
        #[arg(long)]
        root: PathBuf,
    },
    /// Scan every stripe and report located corruption
    Scrub {
        #[arg(long)]
        root: PathBuf,
    },
    /// Reconstruct and rewrite the named disks
    Repair {
        disks: Vec<usize>,
        #[arg(long)]
        root: PathBuf,
    },
    /// Decode to a temp file, invoke $EDITOR, re-encode on save
    Edit {
        #[arg(long)]
        root: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let params = CodecParams::new(args.n, args.m, args.w, args.modulus, args.chunk_size)?;

    match &args.command {
        Command::Encode { file, root } => encode_cmd(&params, file, root),
        Command::Read { out, root } => read_cmd(root, out),
        Command::Erase { disks, root } => erase_cmd(root, disks),
        Command::Scrub { root } => scrub_cmd(root),
        Command::Repair { disks, root } => repair_cmd(root, disks),
        Command::Edit { root } => edit_cmd(root),
    }
}

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

fn load_meta(root: &std::path::Path) -> Result<Meta> {
    let path = root.join(Meta::FILE_NAME);
    let text = std::fs::read_to_string(path)?;
    Meta::from_json(&text)
}

fn save_meta(root: &std::path::Path, meta: &Meta) -> Result<()> {
    std::fs::create_dir_all(root)?;
    std::fs::write(root.join(Meta::FILE_NAME), meta.to_json()?)?;
    Ok(())
}

fn encode_cmd(params: &CodecParams, file: &std::path::Path, root: &std::path::Path) -> Result<()> {
    let bytes = std::fs::read(file)?;
    let codec = Codec::new(*params);
    let (data, data_len) = pad(&bytes, params.n, params.chunk_size);
    let encoded = codec.encode(&data)?;

    let store = FsStore::new(root, params.chunk_size);
    for disk in 0..params.n + params.m {
        for stripe in 0..encoded.stripe_count() {
            store.write(disk, stripe, encoded.chunk(disk, stripe))?;
        }
    }
    save_meta(root, &Meta { params: *params, data_len })?;

    info!(bytes = bytes.len(), stripes = encoded.stripe_count(), "encoded");
    Ok(())
}

fn read_cmd(root: &std::path::Path, out: &std::path::Path) -> Result<()> {
    let meta = load_meta(root)?;
    let params = meta.params;
    let store = FsStore::new(root, params.chunk_size);
    let s = stripe_count(meta.data_len as usize, params.n, params.chunk_size);

    let mut data = raid6ec::Stripes::new(params.n, s, params.chunk_size);
    for disk in 0..params.n {
        for stripe in 0..s {
            let chunk = store.read(disk, stripe)?;
            data.set_chunk(disk, stripe, &chunk);
        }
    }
    let bytes = unpad(&data, meta.data_len);
    std::fs::write(out, &bytes)?;

    info!(bytes = bytes.len(), "read");
    Ok(())
}

fn erase_cmd(root: &std::path::Path, disks: &[usize]) -> Result<()> {
    let meta = load_meta(root)?;
    let store = FsStore::new(root, meta.params.chunk_size);
    for &disk in disks {
        store.erase(disk)?;
        warn!(disk, "erased");
    }
    Ok(())
}

fn scrub_cmd(root: &std::path::Path) -> Result<()> {
    let meta = load_meta(root)?;
    let params = meta.params;
    let codec = Codec::new(params);
    let store = FsStore::new(root, params.chunk_size);
    let s = stripe_count(meta.data_len as usize, params.n, params.chunk_size);

    let mut found = false;
    for stripe in 0..s {
        let mut data = vec![vec![0u8; params.chunk_size]; params.n];
        for disk in 0..params.n {
            data[disk] = store.read(disk, stripe)?;
        }
        let p = store.read(params.n, stripe)?;
        let q = store.read(params.n + 1, stripe)?;

        let k = params.chunk_size;
        let mut p_prime = vec![0u8; k];
        let mut q_prime = vec![0u8; k];
        for byte in 0..k {
            let column: Vec<u8> = (0..params.n).map(|row| data[row][byte]).collect();
            p_prime[byte] = codec.field().dot(codec.generator().row(0), &column)?;
            q_prime[byte] = codec.field().dot(codec.generator().row(1), &column)?;
        }

        match locate_stripe(codec.field(), params.n, &p, &p_prime, &q, &q_prime) {
            StripeHealth::Clean => {}
            StripeHealth::Located(disk) => {
                found = true;
                println!("corrupted: disk {disk}, stripe {stripe}");
            }
            StripeHealth::Unlocatable => return Err(Error::Unlocatable { stripe }),
        }
    }
    if !found {
        info!("scrub complete, no corruption found");
    }
    Ok(())
}

fn repair_cmd(root: &std::path::Path, disks: &[usize]) -> Result<()> {
    let meta = load_meta(root)?;
    let params = meta.params;
    if disks.len() > params.m {
        return Err(Error::TooManyErasures {
            erased: disks.len(),
            max: params.m,
        });
    }
    let codec = Codec::new(params);
    let store = FsStore::new(root, params.chunk_size);
    let s = stripe_count(meta.data_len as usize, params.n, params.chunk_size);
    let erased: BTreeSet<usize> = disks.iter().copied().collect();

    for stripe in 0..s {
        let rows: Vec<(usize, Vec<u8>)> = (0..params.n + params.m)
            .filter(|i| !erased.contains(i))
            .take(params.n)
            .map(|i| store.read(i, stripe).map(|b| (i, b)))
            .collect::<Result<_>>()?;
        let recovered = codec.reconstruct(&rows, disks)?;
        for (disk, bytes) in disks.iter().zip(recovered.iter()) {
            store.write(*disk, stripe, bytes)?;
        }
    }
    info!(disks = ?disks, stripes = s, "repaired");
    Ok(())
}

fn edit_cmd(root: &std::path::Path) -> Result<()> {
    let meta = load_meta(root)?;
    let tmp = std::env::temp_dir().join(format!("raid6ec-edit-{}.tmp", std::process::id()));
    read_cmd(root, &tmp)?;

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor).arg(&tmp).status()?;
    if !status.success() {
        warn!(editor, "editor exited non-zero, aborting re-encode");
        let _ = std::fs::remove_file(&tmp);
        return Ok(());
    }

    let codec_params = meta.params;
    encode_cmd(&codec_params, &tmp, root)?;
    let _ = std::fs::remove_file(&tmp);
    info!("re-encoded edited file");
    Ok(())
}
