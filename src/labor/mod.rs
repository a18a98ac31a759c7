pub mod soc;
