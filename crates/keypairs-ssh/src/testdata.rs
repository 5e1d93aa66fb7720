// ABOUTME: Shared key fixtures for unit tests in this crate.
// ABOUTME: The RSA key is a real 2048-bit public key with no comment.

/// SHA-256 fingerprint of [`RSA_PUBLIC_KEY`], computed independently.
pub const RSA_FINGERPRINT: &str =
    "07:d0:3b:de:86:33:fa:e5:b3:36:55:22:e4:5e:be:ae:12:c2:93:36:c3:7c:f7:44:9c:61:3d:04:23:ed:91:a2";

pub const RSA_PUBLIC_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQDBYIznA\
x9D7118Q1VKGpXy2HDiKyUTM8XcUuhQpo0srqb9rboUp4a9NmCwpWpeElDLuva707GOUnfaBAvHBwsRXyxHJjRaI6Y\
Qj2oLJwqvaSaWUbyT1vtryRqy6J3TecN0WINY71f4uymiMZP0wby4bKBcYnac8KiCIlvkEl0ETjkOGUq8OyWRmn7lj\
j5SESEUdBP0JnuTFKddWTU/wD6wydeJaUhBTqOlHn0kX1GyqoNTE1UEhcM5ZRWgfUZfTjVyDF2kGj3vJLCJtJ8LoGc\
j7YaN4uPg1rBle+izwE/tLonRrds+cev8p6krSSrxWOwBbHkXa6OciiJDvkRzJXzf";
