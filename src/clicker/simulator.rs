//! Balance simulator for the clicker economy.
//! Run with: cargo test -p cli-sim-clicker simulate_greedy -- --nocapture
