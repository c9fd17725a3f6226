use assert_cmd::prelude::*;
use std::process::Command;

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn round_trip(data: &[u8]) -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.bin");
    let sidecar_path = temp_dir.path().join("sidecar.json");
    let out_path = temp_dir.path().join("recovered.bin");
    std::fs::write(&in_path, data)?;

    Command::cargo_bin("dna-ring-codec")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&sidecar_path)
        .assert()
        .success();

    Command::cargo_bin("dna-ring-codec")?
        .arg("expand")
        .arg("-i").arg(&sidecar_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();

    let recovered = std::fs::read(&out_path)?;
    assert_eq!(recovered, data);
    Ok(())
}

#[test]
fn cli_round_trips_empty_input() -> STDRESULT {
    round_trip(&[])
}

#[test]
fn cli_round_trips_small_text() -> STDRESULT {
    round_trip(b"The quick brown fox jumps over the lazy dog.")
}

#[test]
fn cli_round_trips_binary_with_repetition() -> STDRESULT {
    let mut data = Vec::new();
    for i in 0..20_000u32 {
        data.push((i % 251) as u8);
    }
    round_trip(&data)
}

#[test]
fn cli_round_trips_with_explicit_chunk_size() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.bin");
    let sidecar_path = temp_dir.path().join("sidecar.json");
    let out_path = temp_dir.path().join("recovered.bin");
    let data = b"ATCGATCGATCGATCGAAAAAATCGATCGATCG".repeat(50);
    std::fs::write(&in_path, &data)?;

    Command::cargo_bin("dna-ring-codec")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&sidecar_path)
        .arg("--chunk-size").arg("37")
        .assert()
        .success();

    Command::cargo_bin("dna-ring-codec")?
        .arg("expand")
        .arg("-i").arg(&sidecar_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();

    assert_eq!(std::fs::read(&out_path)?, data);
    Ok(())
}

#[test]
fn cli_stats_prints_a_report() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = temp_dir.path().join("input.bin");
    std::fs::write(&in_path, b"stats should run without writing any output file")?;

    let output = Command::cargo_bin("dna-ring-codec")?
        .arg("stats")
        .arg("-i").arg(&in_path)
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("shannon efficiency"));
    assert!(stdout.contains("compression ratio"));
    Ok(())
}
