pub mod cue_store;
