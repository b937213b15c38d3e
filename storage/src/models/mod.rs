mod exchange_record;

pub use exchange_record::ExchangeRecord;
