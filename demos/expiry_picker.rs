//! The two-wheel expiry picker.
//!
//! Run with: `cargo run --example expiry_picker`

use cardform::picker::{ExpiryRange, MONTH_COMPONENT, YEAR_COMPONENT};
use cardform::FormConfig;
use chrono::Utc;

fn main() {
    println!("=== Expiry Picker ===\n");

    let default_range = ExpiryRange::current();
    println!(
        "Default window: {} to {} ({} year rows)\n",
        default_range.minimum(),
        default_range.maximum(),
        default_range.row_count_for(YEAR_COMPONENT)
    );

    let range = FormConfig::new().with_expiry_years(10).expiry_range(Utc::now());

    println!("Window: {} to {}", range.minimum(), range.maximum());
    print_wheel(&range, MONTH_COMPONENT, "Months");
    print_wheel(&range, YEAR_COMPONENT, "Years");
    println!("Rows on component 2: {}\n", range.row_count_for(2));

    println!("--- Selections ---\n");
    let last_year = range.row_count_for(YEAR_COMPONENT) - 1;
    for (month_row, year_row) in [(0, 0), (5, 1), (11, last_year), (99, 99)] {
        let picked = range.resolve_selection(month_row, year_row);
        let wheels = range
            .rows_for(picked)
            .map(|(m, y)| format!("{m},{y}"))
            .unwrap_or_default();
        println!(
            "  rows ({month_row:>2},{year_row:>2}) -> {} (wheels snap to {wheels})",
            picked.format_short()
        );
    }
}

fn print_wheel(range: &ExpiryRange, component: usize, label: &str) {
    let titles: Vec<String> = (0..range.row_count_for(component))
        .filter_map(|row| range.title_for(component, row))
        .collect();
    println!("{label}: {}", titles.join(" "));
}
