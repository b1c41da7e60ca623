#![no_main]

use libfuzzer_sys::fuzz_target;
use mzxic::prelude::*;

fn f32_at(data: &[u8], at: usize) -> f32 {
    let mut bytes = [0u8; 4];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = data.get(at + i).copied().unwrap_or(0);
    }
    f32::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    // Decode the input as a stream of 16-byte scan records followed by queries.
    // Arbitrary floats (NaN, inf, negative) are allowed on purpose: the builder
    // must reject or accept them without panicking.
    let (scan_bytes, query_bytes) = data.split_at(data.len() / 2);

    let scans: Vec<Scan> = scan_bytes
        .chunks(16)
        .map(|chunk| {
            let peaks = (chunk.first().copied().unwrap_or(0) % 8) as usize;
            let mut builder = ScanBuilder::new(0)
                .ms_level(1 + (chunk.get(1).copied().unwrap_or(0) % 3) as i16)
                .retention_time(f32_at(chunk, 2) as f64);
            if chunk.get(6).copied().unwrap_or(0) % 4 != 0 {
                builder = builder.isolation(f32_at(chunk, 7) as f64, 25.0);
            }
            for p in 0..peaks {
                builder = builder.add_peak(f32_at(chunk, 11 + p) as f64, f32_at(chunk, 12 + p).abs());
            }
            builder.build()
        })
        .collect();

    let Ok(index) = ScanIndexBuilder::build(&scans) else {
        return;
    };

    let queries: Vec<FragmentQuery> = query_bytes
        .chunks(17)
        .enumerate()
        .map(|(i, chunk)| {
            FragmentQuery::new(
                f32_at(chunk, 0),
                f32_at(chunk, 4),
                f32_at(chunk, 8),
                f32_at(chunk, 12),
                chunk.get(16).copied().unwrap_or(0) as u32 % 8,
                i as u64,
            )
        })
        .collect();

    // Both paths must agree on point counts and never write out of bounds
    let cpu = ExtractionOrchestrator::new(&index, true).extract_all(&queries, 2);
    let auto = ExtractionOrchestrator::new(&index, false).extract_all(&queries, 3);
    assert_eq!(cpu.total_data_points, auto.total_data_points);
    assert_eq!(cpu.rt_buffer.len(), cpu.total_data_points);
});
