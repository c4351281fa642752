use std::{env, fs::File, time::Instant};

use string_concat_bench::{InputSet, Suite, SuiteKind, Technique};

fn main() {
    // optional fixture files replay a fixed input instead of random tokens
    let runs: Vec<(Suite, InputSet)> = match env::args().skip(1).collect::<Vec<_>>() {
        paths if !paths.is_empty() => paths
            .into_iter()
            .map(|path| {
                let file = File::open(&path).expect("Failed to open fixture");
                let input = InputSet::from_reader(file).expect("Failed to parse fixture");
                let kind = SuiteKind::from_size(input.len())
                    .expect("Fixture must hold exactly 10 or 100 tokens");
                (Suite::new(kind), input)
            })
            .collect(),
        _ => [Suite::ten(), Suite::hundred()]
            .into_iter()
            .map(|suite| {
                let input = suite.setup().expect("Failed to generate input");
                (suite, input)
            })
            .collect(),
    };

    for (suite, input) in runs {
        suite.verify(&input).expect("Techniques disagree");

        println!("{} ({} tokens)", suite.group_name(), input.len());
        for technique in Technique::extended() {
            let instant = Instant::now();
            let combined = suite.run(technique, &input);
            let elapsed = instant.elapsed();

            println!(
                "  {:<18} {:<12} {:>6} bytes  {:?}",
                technique.name(),
                technique.complexity().to_string(),
                combined.len(),
                elapsed,
            );
        }
    }
}
