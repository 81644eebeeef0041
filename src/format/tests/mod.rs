//! Unit tests for the label TXT codec and file layout.
