use bertrand_core::io::{normalize_folder, read_corpus};
use bertrand_core::store::{MemoryStore, MessageStore};
use bertrand_core::{Chain, ChainBuilder, GenerationConfig, LoadPolicy, UserId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Each "<user id>.txt" file in the "data" directory holds one message per line
    let corpus = read_corpus(normalize_folder("./data"))?;
    if corpus.is_empty() {
        println!("No corpus found, add some '<user id>.txt' files to ./data");
        return Ok(());
    }

    // Fill a store the same way the server does from chat messages
    let store = MemoryStore::new();
    let mut user_ids: Vec<UserId> = Vec::new();
    for (user_id, messages) in &corpus {
        for message in messages {
            store.add_message(*user_id, message)?;
        }
        user_ids.push(*user_id);
    }

    // Generation settings: at most 3 sentences, walks cut after 64 words
    let mut config = GenerationConfig::default();
    config.set_sentence_range(1, 3)?;
    config.set_max_steps(64)?;

    // Invalid settings are refused
    match config.set_sentence_range(4, 2) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Refused: {e}"),
    }

    // One chain per user; lines shorter than 3 words are skipped
    for user_id in &user_ids {
        let chain = Chain::load_with(&store, &[*user_id], LoadPolicy::SkipInvalid, config.clone())?;
        println!(
            "User {}: {} words, {} start words, {} end words",
            user_id,
            chain.transitions().len(),
            chain.start_words().len(),
            chain.end_words().len()
        );
        for i in 0..3 {
            println!("  Sentence {}: {}", i + 1, chain.generate_one());
        }
    }

    // A chain blending every user
    let blended = Chain::load_with(&store, &user_ids, LoadPolicy::SkipInvalid, config.clone())?;
    println!("Everyone: {}", blended.generate_many());

    // The strict policy refuses the whole batch on the first short line
    let mut strict = ChainBuilder::new().policy(LoadPolicy::AbortOnInvalid);
    match strict.add_samples(["a perfectly fine sample", "too short"]) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Strict training failed: {e}"),
    }

    Ok(())
}
