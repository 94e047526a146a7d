mod documents;
mod properties;
