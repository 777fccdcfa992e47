mod compact_properties;
