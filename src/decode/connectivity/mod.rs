pub mod edgebreaker;
