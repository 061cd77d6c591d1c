use crate::{
    args::{Action, Args},
    error::{CliError, CliResult},
};
use erasure_core::{debug, info, log::init_logger};
use erasure_protowire::{
    codec::{decode_block, decode_block_base64, encode_block, encode_block_base64},
    common::Block,
};
use erasure_redaction::{
    PreimageSpace, attach_preimages, collect_preimages, decoder::decode_block_writes, extract_preimages, reinstate_preimages,
    to_vanilla, validate,
};
use std::{fs, path::Path};

/// Sets up console and file logging as configured by `args`
pub fn init_logging(args: &Args) -> CliResult<()> {
    Ok(init_logger(args.log_dir(), &args.log_level)?)
}

pub fn read_block(path: &Path, base64: bool) -> CliResult<Block> {
    let block = if base64 {
        decode_block_base64(&fs::read_to_string(path).map_err(|err| CliError::io(path, err))?)?
    } else {
        decode_block(&fs::read(path).map_err(|err| CliError::io(path, err))?)?
    };
    debug!("Read block {} from {}", block.number(), path.display());
    Ok(block)
}

pub fn write_block(path: &Path, block: &Block, base64: bool) -> CliResult<()> {
    let contents = if base64 { format!("{}\n", encode_block_base64(block)).into_bytes() } else { encode_block(block) };
    fs::write(path, contents).map_err(|err| CliError::io(path, err))
}

/// Reads a preimage file: one hex encoded value per line, an empty line standing for an empty value
pub fn read_preimages(path: &Path) -> CliResult<PreimageSpace> {
    let text = fs::read_to_string(path).map_err(|err| CliError::io(path, err))?;
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            hex::decode(line.trim()).map_err(|source| CliError::Hex { path: path.display().to_string(), line: index + 1, source })
        })
        .collect()
}

pub fn format_preimages(preimages: &PreimageSpace) -> String {
    preimages.iter().map(hex::encode).collect::<Vec<_>>().join("\n")
}

/// Runs `action` and returns the text to report on stdout
pub fn run(args: &Args, action: &Action) -> CliResult<String> {
    match action {
        Action::Validate { block, preimages } => {
            let mut block = read_block(block, args.base64)?;
            if let Some(path) = preimages {
                attach_preimages(&mut block, read_preimages(path)?);
            }
            let block = validate(&block)?;
            let writes: usize = decode_block_writes(&block)?.iter().map(|tx| tx.write_count()).sum();
            info!("Block {} is valid", block.number());
            Ok(format!(
                "block {} is valid: {} writes backed by {} preimages",
                block.number(),
                writes,
                block.preimage_space().len()
            ))
        }
        Action::Preimages { block, attached } => {
            let block = read_block(block, args.base64)?;
            let preimages = if *attached { extract_preimages(&block) } else { collect_preimages(&block)? };
            Ok(format_preimages(&preimages))
        }
        Action::Vanilla { block, output } => {
            let vanilla = to_vanilla(&read_block(block, args.base64)?)?;
            write_block(output, &vanilla, args.base64)?;
            info!("Wrote vanilla block {} to {}", vanilla.number(), output.display());
            Ok(String::new())
        }
        Action::Attach { block, preimages, output } => {
            let mut block = read_block(block, args.base64)?;
            let preimages = read_preimages(preimages)?;
            let count = preimages.len();
            attach_preimages(&mut block, preimages);
            write_block(output, &block, args.base64)?;
            info!("Attached {} preimages to block {} in {}", count, block.number(), output.display());
            Ok(String::new())
        }
        Action::Reinstate { block, preimages, output } => {
            let mut block = read_block(block, args.base64)?;
            let reinstated = reinstate_preimages(&mut block, &read_preimages(preimages)?)?;
            write_block(output, &block, args.base64)?;
            info!("Reinstated {} write values of block {} in {}", reinstated, block.number(), output.display());
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erasure_core::log::LogError;
    use erasure_redaction::{
        RedactionError,
        testutils::{EnvelopeBuilder, block_with_envelopes, kv_rwset},
    };
    use tempfile::{TempDir, tempdir};

    fn sample_block() -> Block {
        block_with_envelopes(
            12,
            vec![EnvelopeBuilder::endorser("tx-a").namespace("assets", kv_rwset(&[("a", b"90"), ("b", b"210")])).build()],
        )
    }

    fn write_sample(dir: &TempDir, base64: bool) -> std::path::PathBuf {
        let path = dir.path().join("block");
        write_block(&path, &sample_block(), base64).unwrap();
        path
    }

    #[test]
    fn test_validate_with_preimage_file() {
        let dir = tempdir().unwrap();
        let block = write_sample(&dir, false);
        let args = Args::default();

        let preimages = dir.path().join("preimages.hex");
        fs::write(&preimages, "3930\n323130\n").unwrap();
        let output = run(&args, &Action::Validate { block: block.clone(), preimages: Some(preimages.clone()) }).unwrap();
        assert_eq!(output, "block 12 is valid: 2 writes backed by 2 preimages");

        fs::write(&preimages, "3930\n").unwrap();
        let err = run(&args, &Action::Validate { block: block.clone(), preimages: Some(preimages) }).unwrap_err();
        assert!(matches!(err, CliError::Redaction(RedactionError::PreimageMismatch { ref key, .. }) if key == "b"), "{err}");

        let err = run(&args, &Action::Validate { block, preimages: None }).unwrap_err();
        assert!(matches!(err, CliError::Redaction(_)));
    }

    #[test]
    fn test_attach_vanilla_and_print() {
        let dir = tempdir().unwrap();
        let block = write_sample(&dir, true);
        let args = Args { base64: true, ..Default::default() };

        let collected = run(&args, &Action::Preimages { block: block.clone(), attached: false }).unwrap();
        assert_eq!(collected, "3930\n323130");

        let preimages = dir.path().join("preimages.hex");
        fs::write(&preimages, format!("{collected}\n")).unwrap();
        let attached = dir.path().join("attached");
        run(&args, &Action::Attach { block, preimages, output: attached.clone() }).unwrap();
        assert_eq!(run(&args, &Action::Preimages { block: attached.clone(), attached: true }).unwrap(), collected);

        let vanilla = dir.path().join("vanilla");
        run(&args, &Action::Vanilla { block: attached, output: vanilla.clone() }).unwrap();
        assert_eq!(run(&args, &Action::Preimages { block: vanilla.clone(), attached: false }).unwrap(), "\n");
        assert_eq!(run(&args, &Action::Preimages { block: vanilla.clone(), attached: true }).unwrap(), collected);
        assert!(run(&args, &Action::Validate { block: vanilla, preimages: None }).is_ok());
    }

    #[test]
    fn test_reinstate() {
        let dir = tempdir().unwrap();
        let args = Args::default();
        let vanilla = dir.path().join("vanilla");
        write_block(&vanilla, &to_vanilla(&sample_block()).unwrap(), false).unwrap();

        let preimages = dir.path().join("preimages.hex");
        fs::write(&preimages, "3930\n323130\n").unwrap();
        let restored = dir.path().join("restored");
        run(&args, &Action::Reinstate { block: vanilla.clone(), preimages: preimages.clone(), output: restored.clone() }).unwrap();
        assert_eq!(read_block(&restored, false).unwrap(), sample_block());

        fs::write(&preimages, "3930\n").unwrap();
        let err = run(&args, &Action::Reinstate { block: vanilla, preimages, output: restored }).unwrap_err();
        assert!(matches!(err, CliError::Redaction(RedactionError::PreimageCountMismatch { writes: 2, preimages: 1 })));
    }

    #[test]
    fn test_invalid_inputs() {
        let dir = tempdir().unwrap();
        let preimages = dir.path().join("preimages.hex");
        fs::write(&preimages, "3930\nzz\n").unwrap();
        match read_preimages(&preimages).unwrap_err() {
            CliError::Hex { line, .. } => assert_eq!(line, 2),
            err => panic!("unexpected error {err}"),
        }

        let block = dir.path().join("block");
        fs::write(&block, "not a block").unwrap();
        assert!(matches!(read_block(&block, true), Err(CliError::Codec(_))));
        assert!(matches!(read_block(&dir.path().join("missing"), false), Err(CliError::Io { .. })));
    }

    #[test]
    fn test_logger_is_initialized_once() {
        let args = Args { no_log_files: true, log_level: "warn".to_string(), ..Default::default() };
        let _ = init_logging(&args);
        assert!(matches!(init_logging(&args), Err(CliError::Log(LogError::AlreadyInitialized))));
    }
}
