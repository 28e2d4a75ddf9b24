use simlookup::{Candidate, CatalogSnapshot, Detection, LookupVerbose, MatchResult, Record, StrategyOutcome};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
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

/// Status keywords and the color they are shown in; first substring match wins.
const STATUS_COLORS: &[(&str, &str)] = &[
    ("ASIGNADA", ansi::GREEN),
    ("DISPONIBLE", ansi::GREEN),
    ("SIN INFORMACIÓN", ansi::YELLOW),
    ("EXTRAVIADA", ansi::MAGENTA),
    ("BLOQUEADA", ansi::MAGENTA),
];

fn status_color(estado: Option<&str>) -> &'static str {
    let Some(estado) = estado else {
        return ansi::RED;
    };
    let upper = estado.to_uppercase();
    STATUS_COLORS.iter().find(|(key, _)| upper.contains(key)).map(|(_, color)| *color).unwrap_or(ansi::RED)
}

pub fn print_lookup(input: &str, out: &LookupVerbose, snapshot: &CatalogSnapshot, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &out.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Lookup: \"{}\"", input.trim()), ansi::CYAN)));
    if details.normalized != input {
        println!("  {} {}", palette.dim("normalized:"), palette.paint(&details.normalized, ansi::YELLOW));
    }

    println!("\n{}", palette.paint("━━━ Strategies ━━━", ansi::GRAY));
    for trace in &details.strategies {
        let outcome = match trace.outcome {
            StrategyOutcome::Hit => palette.paint("✓ hit", ansi::GREEN),
            StrategyOutcome::Miss => palette.dim("✗ miss"),
            StrategyOutcome::NotApplicable => palette.dim("– not applicable"),
            StrategyOutcome::Disabled => palette.dim("– disabled"),
        };
        println!(
            "  {} {}  {}",
            palette.paint(format!("{:<24}", trace.strategy.name()), ansi::BLUE),
            outcome,
            palette.dim(format!("{} probes, {:?}", trace.probes, trace.duration))
        );
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    print_result(&out.result, &palette);

    let stats = snapshot.stats();
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Probes: {}  │  Catalog: {} records, {} líneas, {} prefixes (built {})",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(details.probes().to_string(), ansi::CYAN),
        stats.records,
        stats.lineas,
        stats.prefixes,
        palette.dim(snapshot.built_at().format("%Y-%m-%d %H:%M:%S").to_string()),
    );
    println!();
}

pub fn print_candidates(input: &str, candidates: &[Candidate], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Candidates: \"{}\"", input.trim()), ansi::CYAN)));
    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));

    if candidates.is_empty() {
        println!("{}", palette.dim("  No record matches"));
        println!();
        return;
    }

    for (idx, candidate) in candidates.iter().enumerate() {
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&candidate.record.serie, ansi::GREEN)),
            palette.dim("│ strategy:"),
            palette.paint(candidate.strategy.name(), ansi::BLUE),
        );
        print_fields(&candidate.record, &palette);
    }
    if candidates.len() > 1 {
        println!("\n  {}", palette.paint("Ambiguous: a plain lookup returns [0].", ansi::YELLOW));
    }
    println!();
}

pub fn print_detections(detections: &[Detection], color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.paint("━━━ Detections ━━━", ansi::GRAY));

    if detections.is_empty() {
        println!("{}", palette.dim("  No card numbers detected"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • No full serial starting with {} in the text", simlookup::CARRIER_CODE);
        println!("  • Bare suffixes were found but none resolved");
        println!();
        return;
    }

    for (idx, detection) in detections.iter().enumerate() {
        println!(
            "  {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(format!("detected {}", detection.detected), ansi::CYAN),
        );
        print_result(&detection.result, &palette);
    }
    println!();
}

fn print_result(result: &MatchResult, palette: &ansi::Palette) {
    match result {
        MatchResult::Found { record, strategy } => {
            let estado = record.estado.as_deref();
            println!(
                "  {} {} {}",
                palette.bold(palette.paint(&record.serie, ansi::GREEN)),
                palette.paint(estado.unwrap_or("SIN ESTADO"), status_color(estado)),
                palette.dim(format!("(via {})", strategy)),
            );
            print_fields(record, palette);
        }
        MatchResult::NotFound { number } => {
            println!(
                "  {} {}",
                palette.bold(palette.paint(number, ansi::RED)),
                palette.paint("NO ENCONTRADA / DADA DE BAJA", ansi::RED)
            );
        }
    }
}

fn print_fields(record: &Record, palette: &ansi::Palette) {
    let fields = [("línea", &record.linea), ("cuenta", &record.cuenta), ("ubicación", &record.ubicacion)];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("      {} {}", palette.dim(format!("{label}:")), value);
        }
    }
}
