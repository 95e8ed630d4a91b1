use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Booster generation: label, number of flights, payload window (kg),
/// landing success probability.
const ERAS: [(&str, usize, f64, f64, f64); 5] = [
    ("v1.0", 5, 0.0, 700.0, 0.0),
    ("v1.1", 15, 500.0, 4500.0, 0.2),
    ("FT", 20, 2000.0, 9600.0, 0.65),
    ("B4", 6, 2200.0, 9600.0, 0.7),
    ("B5", 10, 3000.0, 9600.0, 0.9),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut flight_numbers: Vec<i64> = Vec::new();
    let mut sites: Vec<&str> = Vec::new();
    let mut classes: Vec<i64> = Vec::new();
    let mut payloads: Vec<f64> = Vec::new();
    let mut versions: Vec<String> = Vec::new();
    let mut categories: Vec<&str> = Vec::new();

    let mut flight: i64 = 1;
    for (category, flights, low, high, success) in ERAS {
        // Early boosters only flew from the first pad.
        let pads = if category == "v1.0" { &SITES[..1] } else { &SITES[..] };

        for _ in 0..flights {
            flight_numbers.push(flight);
            sites.push(rng.pick(pads));
            classes.push(i64::from(rng.next_f64() < success));
            payloads.push(rng.uniform(low, high).round());
            versions.push(format!("F9 {category} B{}", 1000 + flight));
            categories.push(category);
            flight += 1;
        }
    }

    // ---- CSV ----
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for i in 0..flight_numbers.len() {
        writer
            .write_record([
                flight_numbers[i].to_string(),
                sites[i].to_string(),
                classes[i].to_string(),
                format!("{:.1}", payloads[i]),
                versions[i].clone(),
                categories[i].to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(flight_numbers.clone())),
            Arc::new(StringArray::from(sites.clone())),
            Arc::new(Int64Array::from(classes.clone())),
            Arc::new(Float64Array::from(payloads.clone())),
            Arc::new(StringArray::from(
                versions.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(categories.clone())),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} launches to {csv_path} and {parquet_path}",
        flight_numbers.len()
    );
}
