use phishguard::{Classifier, IndicatorSource, IndicatorStore};

fn main() -> anyhow::Result<()> {
    println!("🧪 Replaying indicator database through the classifier");

    let store = match std::env::args().nth(1) {
        Some(path) => IndicatorStore::from_file(&path)?,
        None => IndicatorStore::default(),
    };
    let classifier = Classifier::new(store);

    let mut failures = 0;
    for record in classifier.source().records() {
        let result = classifier.classify(&record.value, record.category);
        let ok = result.verdict == record.threat_level
            && result.confidence == record.confidence
            && result.indicators == record.indicators
            && result.explanation == record.description;

        if ok {
            println!("✅ {:<10} {}", record.category, record.value);
        } else {
            failures += 1;
            println!(
                "❌ {:<10} {} -> {} {}% (expected {} {}%)",
                record.category,
                record.value,
                result.verdict,
                result.confidence,
                record.threat_level,
                record.confidence
            );
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} indicators are shadowed by earlier records");
    }
    println!("All indicators resolve to their own record");
    Ok(())
}
