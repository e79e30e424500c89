#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Plain variants
    fs::write(format!("{dir}/pbm_plain_3x2.pbm"), b"P1\n3 2\n1 0 1\n0 1 0\n").unwrap();
    fs::write(format!("{dir}/pgm_plain_2x2.pgm"), b"P2\n# c\n2 2\n255\n0 255\n128 64\n").unwrap();
    fs::write(format!("{dir}/ppm_plain_1x1.ppm"), b"P3\n1 1\n15\n1 2 15\n").unwrap();

    // Raw variants
    fs::write(format!("{dir}/pbm_raw_10x2.pbm"), b"P4\n10 2\n\xaa\x80\x55\x40").unwrap();
    fs::write(format!("{dir}/pgm_raw_3x2.pgm"), b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();
    let ppm = b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80";
    fs::write(format!("{dir}/ppm_raw_2x2.ppm"), ppm).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p4_short.bin"), b"P4\n10 2\n\xff").unwrap();
    fs::write(format!("{dir}/p2_over_max.bin"), b"P2\n1 1\n15\n16\n").unwrap();
    fs::write(format!("{dir}/p5_16bit.bin"), b"P5\n1 1\n65535\n\x00\x01").unwrap();

    println!("Generated seed corpus in {dir}/");
}
