pub mod synthetic_feed;
