pub mod face_source;
