//! Hand-written diesel schema for the vehicles table

diesel::table! {
    vehicles (id) {
        id -> Integer,
        image_id -> Text,
        token_id -> Nullable<BigInt>,
        vehicle_name -> Text,
        faction -> Text,
        archetype -> Text,
        variant -> Text,
        traits -> Text,
        biome -> Text,
        style -> Text,
        camera_view -> Text,
        lighting -> Text,
        mood -> Text,
        honorary -> Nullable<Text>,
        creator -> Text,
        generation_date -> Text,
        source_prompt -> Text,
        tags -> Text,
        file_name -> Text,
        file_path -> Text,
        archive_id -> Nullable<Text>,
        archive_link -> Nullable<Text>,
        created_at -> Text,
        batch -> Text,
        content_hash -> Text,
        minted -> Bool,
        market_ready -> Bool,
    }
}
