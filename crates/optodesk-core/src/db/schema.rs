//! SQLite schema definition.

/// Complete database schema for optodesk.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Documents (one table, partitioned by collection)
-- ============================================================================

CREATE TABLE IF NOT EXISTS documents (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,       -- insertion order
    collection TEXT NOT NULL
        CHECK (collection IN ('patients', 'bills', 'data', 'healthData')),
    id TEXT NOT NULL,                            -- UUID v4
    body TEXT NOT NULL,                          -- JSON object
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (collection, id)
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);

-- Bodies must be JSON objects
CREATE TRIGGER IF NOT EXISTS documents_check_body BEFORE INSERT ON documents
BEGIN
    SELECT CASE
        WHEN json_valid(new.body) = 0 OR json_type(new.body) != 'object' THEN
            RAISE(ABORT, 'Document body must be a JSON object')
    END;
END;
"#;
