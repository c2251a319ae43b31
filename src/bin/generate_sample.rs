use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

const CITIES: [(&str, &str); 10] = [
    ("Ithaca", "NY"),
    ("Willingboro", "NJ"),
    ("Holyoke", "CO"),
    ("Abilene", "KS"),
    ("New York Worlds Fair", "NY"),
    ("Valley City", "ND"),
    ("Crater Lake", "CA"),
    ("Alma", "MI"),
    ("Eklutna", "AK"),
    ("Hubbard", "OR"),
];
const COLORS: [&str; 5] = ["RED", "GREEN", "BLUE", "ORANGE", "YELLOW"];
const SHAPES: [&str; 8] = [
    "TRIANGLE", "OTHER", "OVAL", "DISK", "LIGHT", "CIRCLE", "FIREBALL", "CYLINDER",
];

/// Deterministic SplitMix64 generator; good enough for sample data.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Pick an item, or the empty string one time in `blank_one_in`.
    fn pick_or_blank<'a>(&mut self, items: &[&'a str], blank_one_in: u64) -> &'a str {
        if self.below(blank_one_in) == 0 {
            ""
        } else {
            items[self.below(items.len() as u64) as usize]
        }
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let first_day = NaiveDate::from_ymd_opt(1930, 1, 1).context("invalid start date")?;
    let span_days = 70 * 365;
    let rows = 2000;

    let output_path = "ufo2.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Index", "City", "Colors Reported", "Shape Reported", "State", "Date"])?;

    // Rows are left unsorted; the dashboard sorts on load.
    for index in 0..rows {
        let (city, state) = CITIES[rng.below(CITIES.len() as u64) as usize];
        let color = rng.pick_or_blank(&COLORS, 3);
        let shape = rng.pick_or_blank(&SHAPES, 12);
        let date = first_day
            .checked_add_days(Days::new(rng.below(span_days)))
            .context("date out of range")?
            .format("%Y-%m-%d")
            .to_string();
        let index = index.to_string();

        writer.write_record([index.as_str(), city, color, shape, state, date.as_str()])?;
    }
    writer.flush()?;

    println!("Wrote {rows} sightings to {output_path}");
    Ok(())
}
