use std::env;
use std::f64::consts::PI;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

fn write_sine_table() {
    const DEPTH: usize = 10;

    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("sine_table.rs");
    let mut file = File::create(dest_path).unwrap();

    writeln!(file, "pub(crate) const SINE_DEPTH: usize = {};", DEPTH).unwrap();
    write!(file, "pub(crate) const SINE: [i32; 1 << SINE_DEPTH] = [").unwrap();

    // Signed Q2.30: +1.0 is 1 << 30 and fits without clamping.
    const AMPLITUDE: f64 = (1u64 << 30) as f64;

    for i in 0..(1 << DEPTH) {
        if i % 4 == 0 {
            write!(file, "\n   ").unwrap();
        }
        // Index 0 is phase 0 (the HDL table starts at the zero crossing).
        let sin = (2. * PI * i as f64 / (1 << DEPTH) as f64).sin();
        let sin = (sin * AMPLITUDE)
            .round()
            .clamp(i32::MIN as f64, i32::MAX as f64) as i32;
        write!(file, " {},", sin).unwrap();
    }
    writeln!(file, "\n];").unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}

fn main() {
    write_sine_table();
}
