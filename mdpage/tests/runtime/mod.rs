mod page_cache;
mod round_trip;
