use graphpad::{Editor, EditorConfig, Hit, Point};
use std::time::Instant;

fn build_grid_editor(edges_target: usize, radius: f64) -> Editor {
    let config = EditorConfig { node_radius: radius, ..EditorConfig::default() };
    let mut ed = match Editor::with_config(config) {
        Ok(ed) => ed,
        Err(e) => { eprintln!("bad config: {}", e); std::process::exit(2); }
    };
    // Grid of nodes, chained horizontally until ~edges_target
    let w = 60usize; let h = 60usize;
    let mut nodes = Vec::with_capacity(w*h);
    for j in 0..h { for i in 0..w { nodes.extend(ed.add_node("", i as f64 * 40.0, j as f64 * 30.0)); } }
    let mut ecount = 0usize;
    'outer: for j in 0..h { for i in 0..(w-1) { let a=nodes[j*w+i]; let b=nodes[j*w+i+1]; ed.add_edge(a, b, ""); ecount+=1; if ecount>=edges_target { break 'outer; } } }
    ed
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut edges = 2000usize;
    let mut picks = 10000usize;
    let mut radius = 10.0f64;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--edges=") { if let Ok(v)=val.parse() { edges=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--radius=") { if let Ok(v)=val.parse() { radius=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let ed = build_grid_editor(edges, radius);

    let mut times_ms: Vec<f64> = Vec::with_capacity(picks);
    let start_all = Instant::now();
    let (mut node_hits, mut edge_hits) = (0usize, 0usize);
    for k in 0..picks {
        let x = (k % 60) as f64 * 40.0 + 13.0;
        let y = ((k/60) % 60) as f64 * 30.0 + 1.5;
        let t0 = Instant::now();
        match ed.pick(Point::new(x, y)) {
            Hit::Node(_) => node_hits += 1,
            Hit::Edge(_) => edge_hits += 1,
            Hit::Canvas => {}
        }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("nodes={} edges={} picks={} node_hits={} edge_hits={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}",
        ed.store().node_count(), ed.store().edge_count(), picks, node_hits, edge_hits, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
