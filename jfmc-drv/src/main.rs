fn main() {
    jfmc_drv::main();
}
