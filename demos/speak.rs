use std::path::PathBuf;
use std::time::Instant;

use bhasha_audio::{
    engines::{gtts::GttsEngine, EngineParams},
    SynthesisEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "ಒಂದು ಎರಡು ಮೂರು".to_string());
    let lang = args.next().unwrap_or_else(|| "kn".to_string());

    let mut engine = GttsEngine::with_params(EngineParams::default())?;

    let synth_start = Instant::now();
    let result = engine.synthesize(&text, &lang)?;
    println!(
        "Synthesized {} bytes of MP3 for {:?} ({}) in {:.2?}",
        result.len(),
        text,
        lang,
        synth_start.elapsed()
    );

    result.write_mp3(&PathBuf::from("output.mp3"))?;
    println!("Saved to output.mp3");

    Ok(())
}
