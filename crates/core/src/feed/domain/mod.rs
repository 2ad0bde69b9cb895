pub mod frame_feed;
