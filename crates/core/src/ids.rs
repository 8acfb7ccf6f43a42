use uuid::Uuid;

macro_rules! fresh_id {
    ($name:ident, $prefix:literal) => {
        /// Generates a new time-ordered identifier.
        pub fn $name() -> String {
            format!(concat!($prefix, "-{}"), Uuid::now_v7())
        }
    };
}

fresh_id!(new_clip_id, "clip");
fresh_id!(new_item_id, "item");
fresh_id!(new_track_id, "track");
