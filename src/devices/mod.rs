// Rigol DS2000 series oscilloscopes. Other Rigol scopes share most of this vocabulary, so they would live alongside it.
pub mod ds2000;
