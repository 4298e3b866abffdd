use mockall::mock;
use tinyrv_core::InstrTrace;
use tinyrv_core::sim::emulator::Emulator;
use tinyrv_core::sim::memory::Ram;

mock! {
    pub Emulator {}
    impl Emulator for Emulator {
        fn step(&mut self) -> Option<InstrTrace>;
        fn check_exit(&self) -> Option<u64>;
        fn attach_memory(&mut self, ram: Ram);
        fn reset(&mut self);
    }
}
