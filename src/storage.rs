use chrono::Local;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write the prime listing: five values per line, a tab after each value
/// except every fifth, which gets a newline instead; a partial final line
/// still ends with a newline.
pub fn write_primes(path: &Path, primes: &[usize]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let mut itoa_buf = itoa::Buffer::new();

    for (i, &prime) in primes.iter().enumerate() {
        writer.write_all(itoa_buf.format(prime).as_bytes())?;
        if (i + 1) % 5 == 0 {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b"\t")?;
        }
    }
    if primes.len() % 5 != 0 {
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

pub fn get_data_dir() -> PathBuf {
    let xdg_data_home = env::var("XDG_DATA_HOME")
        .ok()
        .and_then(|path| {
            if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            }
        })
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share"))
        })
        .expect("Could not determine data directory");

    xdg_data_home.join("segsieve")
}

/// Append one line to the execution log in the data directory. Best-effort;
/// callers treat a failure as a warning, never as a fatal error.
pub fn log_execution(
    limit: usize,
    workers: usize,
    prime_count: usize,
    duration_ms: u128,
) -> std::io::Result<()> {
    let data_dir = get_data_dir();
    fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("execution_log.txt");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    writeln!(
        file,
        "{} | limit {} | threads {} | {} primes | {}ms",
        timestamp, limit, workers, prime_count, duration_ms
    )?;

    Ok(())
}
