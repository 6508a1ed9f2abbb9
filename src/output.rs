use std::{
    fs::OpenOptions,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::metadata::PostMetadata;

/// Opens `out` (truncating it), or stdout when no path is given.
pub fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match out {
        Some(path) => {
            let fd = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            info!("Writing to {path:?}");
            Box::new(BufWriter::new(fd))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

pub fn write_json<W: Write>(mut writer: W, posts: &[PostMetadata]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, posts)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
