fn main() {
    salvo::game::run();
}
