use meetzone::ZoneReport;
use meetzone::format::{clock_12h, long_date, utc_hour_label};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

const RANKING_ROWS: usize = 5;

pub fn print_report(report: &ZoneReport, color: bool) {
    let palette = ansi::Palette::new(color);
    let reference = report.reference;
    println!(
        "\n{}",
        palette.bold(palette.paint(
            format!("🕒 {} {} UTC", long_date(&reference), clock_12h(&reference)),
            ansi::CYAN
        ))
    );

    println!("\n{}", palette.paint("━━━ Zones ━━━", ansi::GRAY));
    print_zones(report, &palette);

    if let Some(pair) = &report.pair {
        println!("\n{}", palette.paint("━━━ Conversion ━━━", ansi::GRAY));
        let (from, to) = (&report.zones[0], &report.zones[1]);
        let sign = if pair.offset_diff_hours > 0 { "+" } else { "" };
        println!(
            "  {} is {} hours from {}",
            palette.bold(from.zone.name()),
            palette.paint(format!("{sign}{}", pair.offset_diff_hours), ansi::GREEN),
            palette.bold(to.zone.name()),
        );
        for ex in &pair.examples {
            let day = match ex.day_shift() {
                0 => String::new(),
                n if n > 0 => format!(" (+{n} day)"),
                n => format!(" ({n} day)"),
            };
            println!(
                "  {:<18} {:>8} {} {}{}",
                palette.dim(&ex.label),
                ex.from_time,
                palette.dim("→"),
                palette.paint(&ex.to_time, ansi::YELLOW),
                palette.dim(day),
            );
        }
    }

    if let Some(overlap) = &report.overlap {
        println!(
            "\n{}",
            palette.paint(
                format!("━━━ Overlap ({:02}:00-{:02}:00 local) ━━━", report.work_hours.start(), report.work_hours.end()),
                ansi::GRAY
            )
        );
        if overlap.is_empty() {
            println!("{}", palette.dim("  No standard work hours overlap."));
            println!("{}", palette.dim("  Consider early morning or late evening meetings."));
        } else {
            let hours: Vec<String> = overlap.hours().iter().map(|&h| utc_hour_label(h)).collect();
            println!("  {}", palette.paint(hours.join("  "), ansi::GREEN));
        }
    }

    if !report.ranking.is_empty() {
        println!("\n{}", palette.paint("━━━ Best meeting times ━━━", ansi::GRAY));
        for score in report.ranking.iter().take(RANKING_ROWS) {
            let locals: Vec<String> = score.local_hours.iter().map(|h| format!("{h:02}:00")).collect();
            let marker = if score.is_full_overlap() {
                palette.paint("✓", ansi::GREEN)
            } else {
                palette.dim(format!("{}/{}", score.working, score.local_hours.len()))
            };
            println!(
                "  {} {} {} {}",
                palette.paint(utc_hour_label(score.utc_hour), ansi::BLUE),
                marker,
                palette.dim("│"),
                locals.join("  "),
            );
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", report.elapsed), ansi::GREEN));
    println!();
}

fn print_zones(report: &ZoneReport, palette: &ansi::Palette) {
    for (idx, zone) in report.zones.iter().enumerate() {
        let dst = match (zone.observes_dst, zone.in_dst) {
            (false, _) => palette.dim("No DST"),
            (true, true) => palette.paint("DST active", ansi::YELLOW),
            (true, false) => palette.dim("Standard time"),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.bold(palette.paint(zone.zone.name(), ansi::BLUE)),
            palette.dim("│"),
            palette.paint(format!("{} ({})", zone.local_time, zone.local_time_24h), ansi::GREEN),
        );
        println!(
            "      {}  {} {}  {}",
            zone.local_date,
            zone.offset,
            palette.dim(&zone.abbreviation),
            dst,
        );
    }
    if report.zones.len() > 1 {
        let spread = spread_minutes(report);
        println!("  {}", palette.dim(format!("offset spread: {}h {:02}m", spread / 60, spread % 60)));
    }
}

fn spread_minutes(report: &ZoneReport) -> i32 {
    let offsets: Vec<i32> = report
        .zones
        .iter()
        .filter_map(|z| meetzone::engine::resolve_offset(report.reference, z.zone).ok())
        .map(|o| o.minutes)
        .collect();
    match (offsets.iter().min(), offsets.iter().max()) {
        (Some(min), Some(max)) => max - min,
        _ => 0,
    }
}
