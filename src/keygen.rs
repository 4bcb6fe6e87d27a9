//! passvault-keygen: prints a freshly generated master secret.
//!
//! Run once when provisioning a deployment; the printed value goes into the
//! environment as PASSVAULT_MASTER_SECRET. Losing the secret makes every
//! stored envelope permanently undecryptable.

use ring::rand::{SecureRandom, SystemRandom};

fn main() {
    let rng = SystemRandom::new();
    let mut key = [0u8; 32];
    rng.fill(&mut key).expect("system RNG unavailable");

    println!();
    println!("Generated master secret:");
    println!();
    println!("    {}", hex::encode(key));
    println!();
    println!("Add it to the service environment as:");
    println!();
    println!("    PASSVAULT_MASTER_SECRET={}", hex::encode(key));
    println!();
    println!("Keep this value out of version control. If it is lost, existing");
    println!("vault entries cannot be decrypted.");
}
